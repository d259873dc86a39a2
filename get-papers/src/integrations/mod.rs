pub mod pubmed;
