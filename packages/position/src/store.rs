use crate::types::Position;

/// Key-value access to positions keyed by (owner, tick_lower, tick_upper).
///
/// Missing positions read as `Position::default()`.
pub trait PositionStore {
    type Owner;

    fn position(&self, owner: &Self::Owner, tick_lower: i32, tick_upper: i32) -> Position;
    fn set_position(
        &mut self,
        owner: &Self::Owner,
        tick_lower: i32,
        tick_upper: i32,
        position: &Position,
    );
}
