pub mod banner;
pub mod nav;
pub mod tickerlist;
