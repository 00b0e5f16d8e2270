use courier_domain::{ApiResponse, RequestErrorKind, ResponseData};
use courier_infrastructure::to_json_stable;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    print!("{}", to_json_stable(value)?);
    Ok(())
}

pub fn print_response(response: &ApiResponse, include_headers: bool) {
    println!(
        "HTTP {} {} ({})",
        response.status,
        response.status_text,
        response.duration_display()
    );
    if include_headers {
        for (name, value) in &response.headers {
            println!("{name}: {value}");
        }
    }
    println!();

    match &response.data {
        ResponseData::Json(value) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{value}"),
        },
        ResponseData::Text(text) => println!("{text}"),
    }
}

pub fn print_request_error(kind: RequestErrorKind, message: &str) {
    eprintln!("{}: {message}", kind.title());
    for suggestion in kind.suggestions() {
        eprintln!("  - {suggestion}");
    }
}
