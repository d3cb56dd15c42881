pub mod bidding;
