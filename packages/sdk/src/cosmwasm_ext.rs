use cosmwasm_std::Empty;

pub type InterContractMsg = Empty;

pub type CosmosMsg = cosmwasm_std::CosmosMsg<InterContractMsg>;
pub type SubMsg = cosmwasm_std::SubMsg<InterContractMsg>;
pub type Response = cosmwasm_std::Response<InterContractMsg>;
