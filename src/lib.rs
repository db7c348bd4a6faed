//! # PromptCraft
//!
//! Command-line front end for `promptcraft-core`: compose a structured prompt
//! document from a rough task and a set of prompting techniques, then enhance
//! it with Gemini.
//!
//! ```bash
//! promptcraft init
//! promptcraft enhance --preset content-writer "Write a tagline for a CRM"
//! promptcraft variations --cot "Explain vector clocks"
//! promptcraft compose --format --format-details "a table" "Compare queues"
//! promptcraft            # interactive session
//! ```

pub mod cli;
