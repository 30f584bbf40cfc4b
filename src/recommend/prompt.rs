//! Prompt construction and model output parsing

use serde::Deserialize;

use crate::StylecastError;
use crate::models::{ClothingItem, RecommendationSet, WeatherReport};

/// Number of outfits requested from the model
pub const OUTFIT_COUNT: usize = 3;

const RESPONSE_SHAPE: &str = r#"{
  "recommendations": [
    {
      "style_description": "스타일 설명",
      "items": {
        "top": {"id": 1, "name": "옷 이름", "image_url": "이미지 URL"},
        "bottom": {"id": 2, "name": "옷 이름", "image_url": "이미지 URL"},
        "outer": {"id": 3, "name": "옷 이름", "image_url": "이미지 URL"},
        "shoes": {"id": 4, "name": "옷 이름", "image_url": "이미지 URL"}
      }
    }
  ]
}"#;

#[derive(Debug, Deserialize)]
struct ModelReply {
    recommendations: Vec<RecommendationSet>,
}

/// Build the stylist prompt from the weather and the full, unfiltered catalog
pub fn build_prompt(
    weather: &WeatherReport,
    catalog: &[ClothingItem],
) -> crate::Result<String> {
    let weather_json = serde_json::to_string_pretty(weather)
        .map_err(|e| StylecastError::model_output(format!("weather serialization: {e}")))?;
    let catalog_json = serde_json::to_string_pretty(catalog)
        .map_err(|e| StylecastError::model_output(format!("catalog serialization: {e}")))?;

    Ok(format!(
        "당신은 날씨에 맞는 옷차림을 추천하는 패션 스타일리스트입니다.\n\
\n\
현재 날씨 정보:\n\
{weather_json}\n\
\n\
사용 가능한 옷 목록:\n\
{catalog_json}\n\
\n\
위 날씨에 어울리는 코디 {OUTFIT_COUNT}세트를 옷 목록에 있는 옷으로만 추천해 주세요.\n\
각 코디의 items에는 top, bottom, shoes를 반드시 포함하고, outer는 날씨가 쌀쌀하거나 추울 때만 포함하세요.\n\
각 옷에는 옷 목록의 id, name, image_url을 그대로 사용하세요.\n\
설명이나 코드 블록 없이 아래 형식의 JSON만 반환하세요.\n\
{RESPONSE_SHAPE}\n"
    ))
}

/// Remove literal code-fence markers the model likes to wrap JSON in
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model text into outfit sets
pub fn parse_recommendations(text: &str) -> crate::Result<Vec<RecommendationSet>> {
    let cleaned = strip_code_fences(text);
    let reply: ModelReply = serde_json::from_str(&cleaned)
        .map_err(|e| StylecastError::model_output(e.to_string()))?;
    Ok(reply.recommendations)
}
