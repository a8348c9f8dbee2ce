pub mod db;
pub mod store;
pub mod upload_service;
pub mod validator_client;
