mod analysis_tests;
mod doc_tests;
mod extractor_tests;
mod lexer_tests;
mod semantic_tests;
