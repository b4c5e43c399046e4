mod concurrency;
mod config;
mod discover;
mod fixtures;
mod logging;
