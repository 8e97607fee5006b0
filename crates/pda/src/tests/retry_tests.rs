// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_mock;
use crate::{
    MockProviderDataApi, OfficePatch, ProviderDataClient, ProviderDataError, RetryPolicy,
    RetryingProviderData,
};

fn create_test_client(attempts: u32) -> RetryingProviderData<MockProviderDataApi> {
    RetryingProviderData::new(create_test_mock(), RetryPolicy::immediate(attempts))
}

#[test]
fn test_read_succeeds_after_transient_failures() {
    let client = create_test_client(3);
    client.inner().fail_next_reads(2);

    let firm = client.get_provider_firm(1).unwrap();

    assert!(firm.is_some());
}

#[test]
fn test_read_gives_up_after_max_attempts() {
    let client = create_test_client(3);
    client.inner().fail_next_reads(3);

    let result = client.get_provider_offices(1);

    assert!(matches!(result, Err(ProviderDataError::Connection(_))));
    // The budget was spent; the next read goes through.
    assert_eq!(client.get_provider_offices(1).unwrap().len(), 2);
}

#[test]
fn test_writes_are_not_retried() {
    let mut client = create_test_client(3);
    client.inner_mut().fail_writes_for_office("1A001L");

    let result = client.patch_office(1, "1A001L", &OfficePatch::default());

    assert!(matches!(result, Err(ProviderDataError::Rejected(_))));
}

#[test]
fn test_transient_classification() {
    assert!(ProviderDataError::RateLimited.is_transient());
    assert!(ProviderDataError::Server { status: 503 }.is_transient());
    assert!(!ProviderDataError::Rejected(String::new()).is_transient());
    assert_eq!(ProviderDataError::RateLimited.kind(), "RateLimited");
}
