//! Mapping of raw listing parameters onto the query engine types.

use serde::de::DeserializeOwned;

use crate::models::config::PagingConfig;
use crate::query::{Listing, PageRequest, SortSpec};
use crate::services::{ServiceError, ServiceResult};

/// Decodes `?page=1&size=20&type=OIL_CHANGE` style query strings into a
/// listing's parameter struct. A leading `?` is ignored.
pub fn parse_query<P: DeserializeOwned>(raw: &str) -> ServiceResult<P> {
    let raw = raw.trim().trim_start_matches('?');
    serde_html_form::from_str(raw).map_err(|err| {
        log::debug!("Rejected query string `{raw}`: {err}");
        ServiceError::InvalidInput(format!("invalid query string: {err}"))
    })
}

/// Builds the page window from a zero-based page index and an optional size.
pub(crate) fn page_request(
    page: Option<u64>,
    size: Option<u32>,
    paging: &PagingConfig,
) -> ServiceResult<PageRequest> {
    let page = i64::try_from(page.unwrap_or(0))
        .map_err(|_| ServiceError::InvalidInput("page is out of range".to_string()))?;
    let size = size.unwrap_or(paging.default_page_size);

    Ok(PageRequest::from_page(
        page,
        i64::from(size),
        paging.max_page_size,
    )?)
}

pub(crate) fn sort_spec(listing: &Listing, raw: Option<&str>) -> ServiceResult<SortSpec> {
    Ok(SortSpec::parse(listing, raw)?)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::query::{MAINTENANCE_RECORDS, SortDirection};

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Params {
        page: Option<u64>,
        size: Option<u32>,
        author: Option<String>,
    }

    #[test]
    fn parses_query_strings_with_or_without_question_mark() {
        let params: Params = parse_query("?page=2&size=5&author=ann%20lee").unwrap();
        assert_eq!(
            params,
            Params {
                page: Some(2),
                size: Some(5),
                author: Some("ann lee".into()),
            }
        );
        assert_eq!(parse_query::<Params>("").unwrap(), Params::default());
    }

    #[test]
    fn malformed_numbers_are_invalid_input() {
        assert!(matches!(
            parse_query::<Params>("page=first"),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn page_defaults_come_from_configuration() {
        let paging = PagingConfig {
            default_page_size: 25,
            max_page_size: 50,
        };
        let page = page_request(None, None, &paging).unwrap();
        assert_eq!((page.offset(), page.limit()), (0, 25));

        let page = page_request(Some(3), Some(10), &paging).unwrap();
        assert_eq!((page.offset(), page.limit()), (30, 10));

        assert!(matches!(
            page_request(None, Some(0), &paging),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(page_request(None, Some(51), &paging).is_err());
    }

    #[test]
    fn sort_falls_back_to_listing_default() {
        let sort = sort_spec(&MAINTENANCE_RECORDS, None).unwrap();
        assert_eq!(sort.field(), "maintenance_date");
        assert_eq!(sort.direction(), SortDirection::Desc);

        let sort = sort_spec(&MAINTENANCE_RECORDS, Some("cost,asc")).unwrap();
        assert_eq!(sort.field(), "cost");
        assert!(sort_spec(&MAINTENANCE_RECORDS, Some("vin,asc")).is_err());
    }
}
