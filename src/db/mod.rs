pub mod indicator_queries;
