//! Contract scenarios.
//!
//! Every scenario runs the exchange inside a "Perform a ... request" step and
//! its checks inside a "Check the response ..." step of the given report, then
//! returns the decoded payload so callers can inspect it further.

use std::time::Duration;

use reqres_models::{
    UnknownListResponse, UserByIdResponse, UserCreateRequest, UserCreateResponse,
    UsersPageResponse,
};
use reqres_test::assertions::{expect_eq, expect_has_items, expect_len, expect_less_than};
use reqres_test::{step, ApiClient, Report, TestError};

use crate::specs;

/// User the lookup scenario asks for.
pub const DEFAULT_USER_ID: &str = "2";

/// First name of [`DEFAULT_USER_ID`].
pub const DEFAULT_USER_FIRST_NAME: &str = "Janet";

/// Last name of [`DEFAULT_USER_ID`].
pub const DEFAULT_USER_LAST_NAME: &str = "Weaver";

/// Number of entries on the first catalog page.
pub const EXPECTED_CATALOG_SIZE: usize = 6;

/// Colours the first catalog page must include.
pub const EXPECTED_COLORS: [&str; 3] = ["#98B2D1", "#BF1932", "#53B0AE"];

/// Upper bound for the delayed listing.
pub const RESPONSE_TIME_LIMIT: Duration = Duration::from_millis(5000);

/// Server-side delay requested by the response time scenario.
pub const DEFAULT_DELAY_SECS: u32 = 3;

/// Creates a user and checks that `name` and `job` are echoed back.
pub async fn create_user(
    client: &ApiClient,
    report: &Report,
    request: &UserCreateRequest,
) -> Result<UserCreateResponse, TestError> {
    let client = client.with_report(report);
    let spec = specs::user_create();

    let response: UserCreateResponse = step(report, "Perform a POST request", async {
        client
            .given(&spec.request)
            .json(request)
            .post("")
            .await?
            .then(&spec.response)?
            .json()
    })
    .await?;

    let label = format!(
        "Check the response ('name' must be '{}'; 'job' must be '{}')",
        request.name.as_deref().unwrap_or_default(),
        request.job.as_deref().unwrap_or_default()
    );
    step(report, label, async {
        expect_eq("name", request.name.as_deref(), response.name.as_deref())?;
        expect_eq("job", request.job.as_deref(), response.job.as_deref())
    })
    .await?;

    Ok(response)
}

/// Fetches one user by id.
pub async fn get_user(
    client: &ApiClient,
    report: &Report,
    id: &str,
) -> Result<UserByIdResponse, TestError> {
    let client = client.with_report(report);
    let spec = specs::user_by_id();

    step(report, "Perform a GET request", async {
        client
            .given(&spec.request)
            .path_param("id", id)
            .get("/{id}")
            .await?
            .then(&spec.response)?
            .json()
    })
    .await
}

/// Checks the first and last name of a fetched user.
pub async fn expect_user_name(
    report: &Report,
    response: &UserByIdResponse,
    first_name: &str,
    last_name: &str,
) -> Result<(), TestError> {
    let label = format!("Check the response (the user name must be {first_name} {last_name})");
    step(report, label, async {
        expect_eq("first_name", Some(first_name), response.first_name())?;
        expect_eq("last_name", Some(last_name), response.last_name())
    })
    .await
}

/// Fetches [`DEFAULT_USER_ID`] and checks it is Janet Weaver.
pub async fn get_default_user(
    client: &ApiClient,
    report: &Report,
) -> Result<UserByIdResponse, TestError> {
    let response = get_user(client, report, DEFAULT_USER_ID).await?;
    expect_user_name(
        report,
        &response,
        DEFAULT_USER_FIRST_NAME,
        DEFAULT_USER_LAST_NAME,
    )
    .await?;
    Ok(response)
}

async fn fetch_catalog(
    client: &ApiClient,
    report: &Report,
) -> Result<UnknownListResponse, TestError> {
    let client = client.with_report(report);
    let spec = specs::unknown();

    step(report, "Perform a GET request", async {
        client
            .given(&spec.request)
            .get("")
            .await?
            .then(&spec.response)?
            .json()
    })
    .await
}

/// Checks the first catalog page holds [`EXPECTED_CATALOG_SIZE`] entries.
pub async fn count_catalog_items(
    client: &ApiClient,
    report: &Report,
) -> Result<UnknownListResponse, TestError> {
    let response = fetch_catalog(client, report).await?;

    let label = format!("Check the response ('data' must contain {EXPECTED_CATALOG_SIZE} items)");
    step(report, label, async {
        expect_len("data", &response.data, EXPECTED_CATALOG_SIZE)
    })
    .await?;

    Ok(response)
}

/// Checks the first catalog page includes every colour of [`EXPECTED_COLORS`].
pub async fn check_catalog_colors(
    client: &ApiClient,
    report: &Report,
) -> Result<UnknownListResponse, TestError> {
    let response = fetch_catalog(client, report).await?;

    let label = format!(
        "Check the response ('data' must include colors {}, {}, and {})",
        EXPECTED_COLORS[0], EXPECTED_COLORS[1], EXPECTED_COLORS[2]
    );
    step(report, label, async {
        expect_has_items("colors", &response.colors(), &EXPECTED_COLORS)
    })
    .await?;

    Ok(response)
}

/// Requests a listing delayed by `delay_secs` and checks it arrives within
/// [`RESPONSE_TIME_LIMIT`].
pub async fn response_time(
    client: &ApiClient,
    report: &Report,
    delay_secs: u32,
) -> Result<UsersPageResponse, TestError> {
    response_time_within(client, report, delay_secs, RESPONSE_TIME_LIMIT).await
}

/// Same as [`response_time`] with an explicit limit.
///
/// The time check runs before the status check, so a slow error response
/// reports the timing first.
pub async fn response_time_within(
    client: &ApiClient,
    report: &Report,
    delay_secs: u32,
    limit: Duration,
) -> Result<UsersPageResponse, TestError> {
    let client = client.with_report(report);
    let spec = specs::user_delay();

    step(report, "Perform a GET request and check the response time", async {
        let response = client
            .given(&spec.request)
            .query("delay", delay_secs)
            .get("")
            .await?;
        expect_less_than("response time", response.elapsed(), limit)?;
        response.then(&spec.response)?.json()
    })
    .await
}
