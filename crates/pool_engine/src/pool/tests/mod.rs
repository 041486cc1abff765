//! Integration tests spanning both pooling strategies

mod pooling_integration;
