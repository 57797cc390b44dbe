pub mod document_crud;
pub mod fts_search;
pub mod vector_search;
