mod event_tests;
mod fetcher_tests;
