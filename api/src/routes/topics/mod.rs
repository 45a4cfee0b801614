pub mod add_topic_route;
pub mod list_topics_route;
