//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational: a despawned entity's id is never confused with a later
    /// entity that reuses its slot.
    pub struct Entity;
}
