//! UI components: the link card and its particle field background.

pub mod link_card;
pub mod particle_field;
