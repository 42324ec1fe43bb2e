//! Ports for Block-DAG Consensus

pub mod inbound;

pub use inbound::BlockDagApi;
