pub mod collector;
pub mod config_loader;
pub mod local_pool;
pub mod orchestrator;
pub mod pool;
pub mod probes;
pub mod registry;
pub mod resolver;
pub mod submitter;

#[cfg(test)]
pub mod test_pool;
