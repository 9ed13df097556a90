// Module structure for the ethlog converter.

// Core engine
pub mod parser;
pub mod record;

// I/O glue
pub mod cli;
pub mod conf;
pub mod sink;
pub mod source;
pub mod runtime;
