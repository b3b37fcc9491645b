#![cfg(unix)]

use reloadwatch::exec::CommandBrowser;
use reloadwatch::host::Browser;

#[tokio::test]
async fn successful_command_refreshes() {
    let browser = CommandBrowser::new("true");
    assert!(browser.refresh().await.is_ok());
    assert_eq!(browser.label(), "cmd:true");
}

#[tokio::test]
async fn failing_command_reports_an_error() {
    let browser = CommandBrowser::new("exit 3");
    let err = browser.refresh().await.unwrap_err();
    assert!(err.to_string().contains("exit 3"));
}
