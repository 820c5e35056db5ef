// Composition root for the khata service.
//
// Responsibilities
// - Instantiate the store adapters and wire them into the two engines.
// - Expose the engine operations to the UI collaborator as JSON routes.

pub mod http;
pub mod inbound;
pub mod state;
