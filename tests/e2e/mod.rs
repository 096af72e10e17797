// End-to-end tests for the podcast API.
//
// Each test gets its own server on an ephemeral port, backed by a temporary
// artifact directory, a manual clock and fake speech/dialogue providers.

mod helpers;
mod test_health;
mod test_podcasts;
