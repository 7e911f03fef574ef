//! Dispatcher tests shared across unit and behavioural suites.

mod support;
