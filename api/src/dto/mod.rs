pub mod auth;

pub use auth::{
    LoginResponse, MessageResponse, OtpInput, RequestOtpRequest, SessionResponse,
    VerifyOtpRequest,
};
