mod local_source_tests;
mod pipeline_tests;
