//! Itinerary text generation: the prompt template, the generator port and its
//! Gemini adapter, and the planner tying them to the route sequencer.

pub mod gemini_api;
pub mod itinerary;
pub mod narrative_generator;
pub mod prompt;

pub use gemini_api::{GeminiClient, GeminiClientParams};
pub use itinerary::{TripDetails, placeholder_stops, plan_itinerary};
pub use narrative_generator::{GenerationFailure, NarrativeGenerator};
pub use prompt::ItineraryPrompt;
