mod common;
mod prediction;
