mod cog_state;
mod planner;
mod ticket;
