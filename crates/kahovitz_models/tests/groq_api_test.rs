use kahovitz_core::{GenerateRequest, Message};
use kahovitz_interface::KahovitzDriver;
use kahovitz_models::GroqDriver;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_groq_basic_generation() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let driver = GroqDriver::new("llama-3.1-8b-instant")?;

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Hello")])
        .max_tokens(Some(10))
        .build()?;

    let response = driver.generate(&request).await?;

    assert!(response.text().is_some(), "Should receive text");
    println!("Response: {:?}", response.text());

    Ok(())
}
