use assert_cmd::prelude::*;
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

// A blank query never reaches the network, so this runs offline.
#[test]
fn blank_search_finds_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.args(["search", "   "]);
    cmd.assert().success().stdout("No books found\n");

    Ok(())
}

#[test]
fn blank_search_as_json_is_empty_list() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.args(["--json", "search", ""]);
    cmd.assert().success().stdout("[]\n");

    Ok(())
}

#[test]
fn empty_isbn_has_no_ratings() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.args(["ratings", ""]);
    cmd.assert().success().stdout("No ratings available\n");

    Ok(())
}

#[test]
fn reviews_without_api_key_are_empty() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.env_remove("SHELF_NYTIMES_API_KEY");
    cmd.args(["reviews", "9780441013593"]);
    cmd.assert().success().stdout("No reviews available\n");

    Ok(())
}

#[test]
fn insecure_catalog_url_fails_search() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("shelf")?;

    cmd.args(["--catalog-url", "http://127.0.0.1:9", "search", "dune"]);
    cmd.assert().failure().code(2);

    Ok(())
}
