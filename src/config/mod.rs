pub mod validator_config;
