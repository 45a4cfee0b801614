pub mod topic_store;
