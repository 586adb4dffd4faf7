//! # link-repair
//!
//! Pure text pipeline for escaped links: pull URL candidates out of comment markup
//! ([`extract_urls`]), keep the ones carrying a markdown escape artifact ([`is_broken_url`]),
//! undo the escaping ([`fix_broken_url`]) and render the reply text ([`compose_reply`]).
//! No I/O and no platform types; the bot application wires these into its stream processors.

mod broken;
mod compose;
mod extract;

pub use broken::{find_broken_urls, fix_broken_url, fix_broken_urls, is_broken_url, PROBLEM_CHARACTERS};
pub use compose::{compose_reply, REPLY_FOOTER, REPLY_PREAMBLE};
pub use extract::{extract_urls, unwrap_markdown_links};
