//! Database repository layer for the planner.
//!
//! Repositories hold a borrowed connection, use SeaORM entity models internally, and return
//! domain models with Discord ids already parsed. They only surface `DbErr`; deciding what a
//! missing record means is left to the service layer.

pub mod banner;
pub mod cog_state;
pub mod planner;
pub mod ticket;

#[cfg(test)]
mod test;
