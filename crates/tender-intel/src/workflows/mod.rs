pub mod tenders;
