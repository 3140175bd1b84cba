use std::collections::BTreeMap;

use serde_json::json;

use super::*;

fn env_overrides() -> BTreeMap<String, String> {
    BTreeMap::from([("WARM_ENI_TARGET".into(), "0".into()), ("WARM_IP_TARGET".into(), "3".into())])
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_set_env_and_await_rollout(test_daemonset: appsv1::DaemonSet, fast_poll: PollPolicy) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let ds_json = to_json(&test_daemonset);
    fake_apiserver
        .handle_get(daemonset_path(), ds_json.clone())
        .handle(move |when, then| {
            when.method(httpmock::Method::PATCH)
                .path(daemonset_path())
                .json_body(build_env_patch(TEST_DAEMONSET_CONTAINER, &env_overrides()));
            then.json_body(ds_json.clone());
        })
        .build();

    set_env_and_await_rollout(
        client,
        TEST_DAEMONSET,
        TEST_NAMESPACE,
        TEST_DAEMONSET_CONTAINER,
        &env_overrides(),
        &fast_poll,
    )
    .await
    .unwrap();
    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_set_env_and_await_rollout_missing_container(test_daemonset: appsv1::DaemonSet, fast_poll: PollPolicy) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_get(daemonset_path(), to_json(&test_daemonset)).build();

    let err = set_env_and_await_rollout(
        client,
        TEST_DAEMONSET,
        TEST_NAMESPACE,
        "not-the-agent",
        &env_overrides(),
        &fast_poll,
    )
    .await
    .unwrap_err()
    .downcast::<KubernetesError>()
    .unwrap();
    fake_apiserver.assert();
    assert!(matches!(err, KubernetesError::ContainerNotFound(..)));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_set_env_and_await_rollout_never_finishes(no_wait: PollPolicy) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let stale = to_json(&test_daemonset(1, 0));
    fake_apiserver
        .handle_get(daemonset_path(), stale.clone())
        .handle_patch(daemonset_path(), stale)
        .build();

    let err = set_env_and_await_rollout(
        client,
        TEST_DAEMONSET,
        TEST_NAMESPACE,
        TEST_DAEMONSET_CONTAINER,
        &env_overrides(),
        &no_wait,
    )
    .await
    .unwrap_err()
    .downcast::<PollError>()
    .unwrap();
    fake_apiserver.assert();
    assert!(matches!(err, PollError::Timeout(..)));
}

#[rstest]
fn test_build_env_patch() {
    assert_eq!(
        build_env_patch("aws-node", &env_overrides()),
        json!({
            "spec": {
                "template": {
                    "spec": {
                        "containers": [{
                            "name": "aws-node",
                            "env": [
                                {"name": "WARM_ENI_TARGET", "value": "0"},
                                {"name": "WARM_IP_TARGET", "value": "3"},
                            ],
                        }],
                    },
                },
            },
        })
    );
}

#[rstest]
#[case::rolled_out(2, 4, true)]
#[case::rolling(2, 3, false)]
#[case::not_observed(1, 4, false)]
fn test_is_rollout_complete(#[case] observed_generation: i64, #[case] updated: i32, #[case] expected: bool) {
    let ds = test_daemonset(observed_generation, updated);
    assert_eq!(is_rollout_complete(&ds), expected);
}
