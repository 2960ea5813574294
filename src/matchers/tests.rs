//! Tests for the fluent assertion API.

use super::expect::expect;
use crate::expected;
use crate::ledger::CallLedger;
use crate::ExpectedValue;
use serde_json::json;

fn s3_ledger() -> CallLedger {
    let mut ledger = CallLedger::new("S3Client");
    ledger.record("GetObjectCommand", json!({"Bucket": "foo", "Key": "test.txt"}));
    ledger.record("GetBucketAclCommand", json!({"Bucket": "foo"}));
    ledger.record("GetBucketAclCommand", json!({"Bucket": "bar"}));
    ledger
}

#[test]
fn received_command() {
    let ledger = s3_ledger();

    expect(&ledger).to_have_received_command("GetObjectCommand");
    expect(&ledger).not().to_have_received_command("PutObjectCommand");
}

#[test]
#[should_panic(expected = "to be called at least once")]
fn received_command_fails_when_never_called() {
    expect(&s3_ledger()).to_have_received_command("PutObjectCommand");
}

#[test]
#[should_panic(expected = "to not be called at all, but actually been called 1 times")]
fn negated_received_command_fails_when_called() {
    expect(&s3_ledger()).not().to_have_received_command("GetObjectCommand");
}

#[test]
fn received_command_times() {
    let ledger = s3_ledger();

    expect(&ledger).to_have_received_command_times("GetBucketAclCommand", 2);
    expect(&ledger).to_have_received_command_times("PutObjectCommand", 0);
    expect(&ledger).not().to_have_received_command_times("GetBucketAclCommand", 3);
}

#[test]
#[should_panic(expected = "to be called 3 times, but got 2 times")]
fn received_command_times_fails_on_wrong_count() {
    expect(&s3_ledger()).to_have_received_command_times("GetBucketAclCommand", 3);
}

#[test]
fn received_command_once() {
    let ledger = s3_ledger();

    expect(&ledger).to_have_received_command_once("GetObjectCommand");
    expect(&ledger).not().to_have_received_command_once("GetBucketAclCommand");
    expect(&ledger).not().to_have_received_command_once("PutObjectCommand");
}

#[test]
#[should_panic(expected = "to be called once, but got 2 times")]
fn received_command_once_fails_on_repeat() {
    expect(&s3_ledger()).to_have_received_command_once("GetBucketAclCommand");
}

#[test]
fn received_command_with() {
    let ledger = s3_ledger();

    expect(&ledger)
        .to_have_received_command_with("GetObjectCommand", &expected! {"Bucket" => "foo"});
    expect(&ledger).to_have_received_command_with(
        "GetObjectCommand",
        &expected! {"Key" => ExpectedValue::matching_glob("*.txt").unwrap()},
    );
    expect(&ledger)
        .not()
        .to_have_received_command_with("GetObjectCommand", &expected! {"Bucket" => "bar"});
    // Extra expected fields the call never carried fail the match.
    expect(&ledger).not().to_have_received_command_with(
        "GetObjectCommand",
        &expected! {"Bucket" => "foo", "VersionId" => "10"},
    );
}

#[test]
#[should_panic(expected = "to be called with arguments")]
fn received_command_with_fails_on_mismatch() {
    expect(&s3_ledger())
        .to_have_received_command_with("GetObjectCommand", &expected! {"Bucket" => "bar"});
}

#[test]
fn received_command_exactly_once_with() {
    let ledger = s3_ledger();

    expect(&ledger).to_have_received_command_exactly_once_with(
        "GetObjectCommand",
        &expected! {"Bucket" => "foo"},
    );
    // Two GetBucketAclCommand calls: a match exists, but not exactly once.
    expect(&ledger).not().to_have_received_command_exactly_once_with(
        "GetBucketAclCommand",
        &expected! {"Bucket" => "foo"},
    );
}

#[test]
fn received_nth_command_with() {
    let ledger = s3_ledger();

    expect(&ledger)
        .to_have_received_nth_command_with("GetBucketAclCommand", 2, &expected! {"Bucket" => "bar"});
    expect(&ledger)
        .not()
        .to_have_received_nth_command_with("GetBucketAclCommand", 1, &expected! {"Bucket" => "bar"});
    // Beyond the recorded calls: an ordinary failure, not a panic.
    expect(&ledger)
        .not()
        .to_have_received_nth_command_with("GetBucketAclCommand", 5, &expected! {"Bucket" => "bar"});
}

#[test]
#[should_panic(expected = "expected 2nd \"GetObjectCommand\" to be called with arguments")]
fn received_nth_command_with_fails_beyond_count() {
    expect(&s3_ledger())
        .to_have_received_nth_command_with("GetObjectCommand", 2, &expected! {"Bucket" => "foo"});
}

#[test]
fn received_last_command_with() {
    let ledger = s3_ledger();

    expect(&ledger)
        .to_have_received_last_command_with("GetBucketAclCommand", &expected! {"Bucket" => "bar"});
    expect(&ledger)
        .not()
        .to_have_received_last_command_with("GetBucketAclCommand", &expected! {"Bucket" => "foo"});
    expect(&ledger)
        .not()
        .to_have_received_last_command_with("PutObjectCommand", &expected! {"Bucket" => "foo"});
}

#[test]
fn received_any_command() {
    expect(&s3_ledger()).to_have_received_any_command();
    expect(&CallLedger::new("S3Client")).not().to_have_received_any_command();
}

#[test]
#[should_panic(expected = "expected \"S3Client\" to receive at least one command")]
fn received_any_command_fails_on_empty_ledger() {
    expect(&CallLedger::new("S3Client")).to_have_received_any_command();
}

#[test]
fn double_negation_cancels() {
    expect(&s3_ledger()).not().not().to_have_received_command("GetObjectCommand");
}
