//! Converts a place-details payload into the stored [`CafeRecord`].

use cafemap_core::{CafeRecord, Region, Review, WEEKDAY_TEXT_NOT_PROVIDED};

use crate::types::{PlaceCandidate, PlaceDetail};

/// Builds the normalized record for `region`, defaulting every optional field.
///
/// Identity fields fall back to the search candidate when the details payload
/// leaves them blank.
#[must_use]
pub fn build_cafe_record(
    region: &Region,
    candidate: &PlaceCandidate,
    detail: &PlaceDetail,
) -> CafeRecord {
    let name = if detail.name.is_empty() {
        candidate.name.clone()
    } else {
        detail.name.clone()
    };
    let place_id = if detail.place_id.is_empty() {
        candidate.place_id.clone()
    } else {
        detail.place_id.clone()
    };

    #[allow(clippy::cast_possible_truncation)]
    let rating = detail.rating.unwrap_or(0.0).round() as i64;

    let weekday_text = detail
        .opening_hours
        .as_ref()
        .and_then(|hours| hours.weekday_text.clone())
        .unwrap_or_else(|| vec![WEEKDAY_TEXT_NOT_PROVIDED.to_string()]);

    let reviews = detail
        .reviews
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|r| Review {
            reviewer_name: r.author_name.clone(),
            reviewer_rating: r.rating,
            review_text: r.text.clone(),
            review_time: r.relative_time_description.clone(),
        })
        .collect();

    CafeRecord {
        city: region.city.clone(),
        district: region.district.clone(),
        formatted_address: detail.formatted_address.clone(),
        formatted_phone_number: detail.formatted_phone_number.clone().unwrap_or_default(),
        name,
        rating,
        price_level: detail.price_level,
        services: detail.services(),
        types: detail.types.clone().unwrap_or_default(),
        user_rating_total: detail.user_ratings_total.unwrap_or(0),
        vicinity: detail.vicinity.clone().unwrap_or_default(),
        place_id,
        weekday_text,
        reviews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpeningHours, PlaceReview};

    fn region() -> Region {
        Region::new("台北市", "大安區")
    }

    fn candidate() -> PlaceCandidate {
        PlaceCandidate {
            place_id: "p1".to_string(),
            name: "Search Name".to_string(),
            rating: Some(4.5),
            vicinity: None,
            geometry: None,
        }
    }

    #[test]
    fn sparse_detail_gets_documented_defaults() {
        let detail = PlaceDetail {
            place_id: "p1".to_string(),
            name: "Cafe".to_string(),
            formatted_address: "106台北市大安區".to_string(),
            ..PlaceDetail::default()
        };
        let record = build_cafe_record(&region(), &candidate(), &detail);
        assert_eq!(record.rating, 0);
        assert!(record.types.is_empty());
        assert!(record.reviews.is_empty());
        assert_eq!(record.weekday_text, vec!["not provided".to_string()]);
        assert_eq!(record.formatted_phone_number, "");
        assert_eq!(record.vicinity, "");
        assert_eq!(record.user_rating_total, 0);
        assert_eq!(record.price_level, None);
        assert!(!record.services.serves_beer);
        assert_eq!(record.city, "台北市");
        assert_eq!(record.district, "大安區");
    }

    #[test]
    fn rating_rounds_to_nearest_integer() {
        let mut detail = PlaceDetail {
            rating: Some(4.5),
            ..PlaceDetail::default()
        };
        assert_eq!(build_cafe_record(&region(), &candidate(), &detail).rating, 5);
        detail.rating = Some(4.4);
        assert_eq!(build_cafe_record(&region(), &candidate(), &detail).rating, 4);
    }

    #[test]
    fn full_detail_is_copied_through() {
        let detail = PlaceDetail {
            place_id: "p1".to_string(),
            name: "Cafe".to_string(),
            formatted_address: "addr".to_string(),
            formatted_phone_number: Some("02 1234 5678".to_string()),
            rating: Some(4.2),
            price_level: Some(2),
            serves_beer: Some(true),
            takeout: Some(true),
            types: Some(vec!["cafe".to_string(), "food".to_string()]),
            user_ratings_total: Some(321),
            vicinity: Some("大安區".to_string()),
            opening_hours: Some(OpeningHours {
                weekday_text: Some(vec!["星期一: 08:00–18:00".to_string()]),
            }),
            reviews: Some(vec![PlaceReview {
                author_name: "Lin".to_string(),
                rating: 5.0,
                text: "good".to_string(),
                relative_time_description: "2 週前".to_string(),
            }]),
            ..PlaceDetail::default()
        };
        let record = build_cafe_record(&region(), &candidate(), &detail);
        assert_eq!(record.formatted_phone_number, "02 1234 5678");
        assert_eq!(record.price_level, Some(2));
        assert!(record.services.serves_beer && record.services.takeout);
        assert_eq!(record.types, vec!["cafe", "food"]);
        assert_eq!(record.user_rating_total, 321);
        assert_eq!(record.weekday_text, vec!["星期一: 08:00–18:00"]);
        assert_eq!(record.reviews.len(), 1);
        assert_eq!(record.reviews[0].reviewer_name, "Lin");
        assert_eq!(record.reviews[0].review_time, "2 週前");
    }

    #[test]
    fn opening_hours_without_weekday_text_uses_placeholder() {
        let detail = PlaceDetail {
            opening_hours: Some(OpeningHours::default()),
            ..PlaceDetail::default()
        };
        let record = build_cafe_record(&region(), &candidate(), &detail);
        assert_eq!(record.weekday_text, vec!["not provided"]);
    }

    #[test]
    fn blank_identity_falls_back_to_candidate() {
        let record = build_cafe_record(&region(), &candidate(), &PlaceDetail::default());
        assert_eq!(record.place_id, "p1");
        assert_eq!(record.name, "Search Name");
    }
}
