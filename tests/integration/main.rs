//! Integration tests for lectern

mod helpers;

mod cli_test;
mod engine_test;
mod lesson_test;
