pub mod batch_config_dto;
pub mod topology_dto;
