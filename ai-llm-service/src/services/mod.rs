pub mod gemini_service;
pub mod open_ai_service;

#[cfg(test)]
pub(crate) mod test_server;
