//! Premium-category prediction endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::inference::Prediction;
use crate::models::UserProfile;
use crate::validate;

/// `POST /predict` — classify a user profile into a premium category.
///
/// The raw body is validated into a `RiskProfile`, features are derived,
/// and the classifier runs on them. A missing model is reported per
/// request instead of refusing to start the server.
pub async fn premium_category(
    State(ctx): State<ApiContext>,
    Json(input): Json<UserProfile>,
) -> Result<Json<Prediction>, ApiError> {
    let profile = validate::user_profile(&input)?;

    let classifier = ctx
        .classifier
        .as_ref()
        .ok_or_else(|| ApiError::Inference("prediction model is not loaded".to_string()))?;

    let features = profile.features();
    tracing::debug!(
        bmi = features.bmi,
        age_group = features.age_group.as_str(),
        lifestyle_risk = features.lifestyle_risk.as_str(),
        city_tier = features.city_tier,
        "running premium prediction"
    );

    let prediction = classifier.predict(&features)?;
    Ok(Json(prediction))
}
