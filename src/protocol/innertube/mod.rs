//! Wire model of the InnerTube JSON API.
//!
//! * [`runs`] - Styled text and the separator conventions in it
//! * [`endpoint`] - Navigation targets and page types
//! * [`renderer`] - Renderer nodes: shelves, carousels and items
//! * [`response`] - Outlines of `browse`, `search` and `next` responses
//! * [`player`] - Playability and stream formats
//!
//! These types mirror the upstream JSON and are decoded per request, then
//! discarded once mapped into the domain model. Every list of renderer nodes
//! is decoded leniently: a node that does not fit its shape is dropped
//! without failing the response.

pub mod endpoint;
pub mod player;
pub mod renderer;
pub mod response;
pub mod runs;
