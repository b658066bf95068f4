mod common;
mod features;
mod scoring;
