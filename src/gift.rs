//! GIFT-dialect quiz format pipeline.
//!
//! Data flows leaf-first through the modules below: a persisted options
//! value is recovered by [`options`], raw text blocks are segmented by
//! [`blocks`] and parsed by [`parser`] into [`question::Question`] records,
//! batches are checked by [`validator`] against a target profile, options
//! are reordered by [`shuffle`] at presentation time, and [`formatter`]
//! serializes records back into the text format when round-tripping for
//! editing. [`analysis`] sits upstream and suggests how many questions a
//! body of source text deserves.

pub mod analysis;
pub mod blocks;
pub mod formatter;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod question;
pub mod sections;
pub mod shuffle;
pub mod validator;
