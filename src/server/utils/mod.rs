pub mod embed_tokens;
