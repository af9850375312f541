//! HTML views for the page routes.

use actix_web::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::domain::{
    CatalogueCounts, CategoryWithMonuments, Error, Monument, MonumentDetails, Province, User,
    WeatherSummary, format_date_with_time,
};

/// Messages to show for a rejected form: one per failing field when the
/// error carries field details, otherwise the error message.
pub fn messages_for(error: &Error) -> Vec<String> {
    let fields = error
        .details()
        .and_then(|details| details.get("fields"))
        .and_then(|fields| fields.as_array());
    match fields {
        Some(fields) if !fields.is_empty() => fields
            .iter()
            .filter_map(|field| field.get("message").and_then(|m| m.as_str()))
            .map(str::to_owned)
            .collect(),
        _ => vec![error.message().to_owned()],
    }
}

fn document(title: &str, viewer: Option<&User>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Monuments" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (site_header(viewer))
                main { (content) }
            }
        }
    }
}

fn site_header(viewer: Option<&User>) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" { "Monuments" }
            nav.site-nav {
                @if let Some(user) = viewer {
                    a href="/home" { "Add" }
                    a href="/report" { "Report" }
                    a href="/settings" { "Settings" }
                    @if user.user_type.is_admin() {
                        a href="/adminDashboard" { "Admin Dashboard" }
                    }
                    span.viewer { (user.full_name()) }
                    a href="/logout" { "Log out" }
                } @else {
                    a href="/signup" { "Sign up" }
                    a href="/login" { "Log in" }
                }
            }
        }
    }
}

fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors role="alert" {
                @for message in errors {
                    li { (message) }
                }
            }
        }
    }
}

fn notice(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p.notice role="status" { (message) }
        }
    }
}

/// Landing page.
pub fn main_page() -> Markup {
    document(
        "Welcome",
        None,
        html! {
            h1 { "Historical monuments of Ireland" }
            p { "Record the monuments you visit, group them by province and theme, and check the weather before you go." }
            p {
                a.button href="/signup" { "Sign up" }
                " or "
                a href="/login" { "log in" }
            }
        },
    )
}

fn account_fields(user: Option<&User>, show_user_type: bool) -> Markup {
    let admin = user.is_some_and(|user| user.user_type.is_admin());
    html! {
        label { "First name" input type="text" name="firstName" value=[user.map(|u| u.first_name.as_str())]; }
        label { "Last name" input type="text" name="lastName" value=[user.map(|u| u.last_name.as_str())]; }
        label { "Email" input type="email" name="email" value=[user.map(|u| u.email.as_str())]; }
        label { "Password" input type="password" name="password"; }
        @if show_user_type {
            label {
                "Account type"
                select name="userType" {
                    option value="User" selected[!admin] { "User" }
                    option value="Admin" selected[admin] { "Admin" }
                }
            }
        }
    }
}

/// Signup form, optionally with errors or a notice.
pub fn signup_page(errors: &[String], notice_text: Option<&str>) -> Markup {
    document(
        "Sign up",
        None,
        html! {
            h1 { "Sign up" }
            (notice(notice_text))
            (error_list(errors))
            form method="post" action="/signup" {
                (account_fields(None, true))
                button type="submit" { "Sign up" }
            }
        },
    )
}

/// Login form.
pub fn login_page(errors: &[String]) -> Markup {
    document(
        "Log in",
        None,
        html! {
            h1 { "Log in" }
            (error_list(errors))
            form method="post" action="/login" {
                label { "Email" input type="email" name="email"; }
                label { "Password" input type="password" name="password"; }
                button type="submit" { "Log in" }
            }
        },
    )
}

/// Account settings for the signed-in user.
pub fn settings_page(user: &User, errors: &[String], just_updated: bool) -> Markup {
    document(
        "Settings",
        Some(user),
        html! {
            h1 { "Settings" }
            @if just_updated {
                (notice(Some("Settings updated")))
            }
            (error_list(errors))
            form method="post" action="/settings" {
                (account_fields(Some(user), true))
                button type="submit" { "Save" }
            }
            form method="post" action={ "/deleteAccount/" (user.id) } {
                button.danger type="submit" { "Delete my account" }
            }
        },
    )
}

/// Every account with the catalogue totals.
pub fn admin_dashboard(viewer: &User, users: &[User], counts: CatalogueCounts) -> Markup {
    document(
        "Admin Dashboard",
        Some(viewer),
        html! {
            h1 { "Admin Dashboard" }
            dl.counts {
                dt { "Users" } dd { (counts.users) }
                dt { "Monuments" } dd { (counts.monuments) }
                dt { "Categories" } dd { (counts.categories) }
            }
            table.users {
                thead {
                    tr { th { "Name" } th { "Email" } th { "Type" } th { "Records" } th { "Last login" } th {} }
                }
                tbody {
                    @for user in users {
                        tr {
                            td { (user.full_name()) }
                            td { (user.email) }
                            td { (user.user_type) }
                            td { (user.record_count) }
                            td {
                                @if let Some(at) = user.last_login {
                                    (format_date_with_time(&at))
                                } @else {
                                    "Never"
                                }
                            }
                            td {
                                form method="post" action={ "/deleteAccount/" (user.id) } {
                                    button.danger type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Monument fields shared by the add and edit forms.
struct MonumentFormValues<'a> {
    action: String,
    monument: Option<&'a Monument>,
    categories: &'a [String],
    selected: &'a [String],
}

fn monument_form(values: &MonumentFormValues<'_>) -> Markup {
    let monument = values.monument;
    let latitude = monument.map(|m| m.coordinates.latitude.to_string());
    let longitude = monument.map(|m| m.coordinates.longitude.to_string());
    html! {
        form method="post" action=(values.action) enctype="multipart/form-data" {
            label { "Title" input type="text" name="title" value=[monument.map(|m| m.title.as_str())]; }
            label { "Description" textarea name="description" { @if let Some(m) = monument { (m.description) } } }
            label {
                "Province"
                select name="province" {
                    @for province in Province::ALL {
                        option value=(province.as_str()) selected[monument.is_some_and(|m| m.province == province)] {
                            (province.as_str())
                        }
                    }
                }
            }
            label { "County" input type="text" name="county" value=[monument.map(|m| m.county.as_str())]; }
            label { "Latitude" input type="text" name="latitude" value=[latitude]; }
            label { "Longitude" input type="text" name="longitude" value=[longitude]; }
            fieldset.categories {
                legend { "Categories" }
                @for title in values.categories {
                    label {
                        input type="checkbox" name="category" value=(title) checked[values.selected.contains(title)];
                        (title)
                    }
                }
                label { "New category" input type="text" name="category"; }
            }
            label { "Images" input type="file" name="imageUpload" accept="image/*" multiple; }
            @if monument.is_some() {
                label {
                    input type="checkbox" name="imagesCleared" value="true";
                    "Replace existing images with the placeholder"
                }
            }
            button type="submit" { "Save" }
        }
    }
}

/// Add-monument form.
pub fn home_page(viewer: &User, categories: &[String], errors: &[String]) -> Markup {
    document(
        "Add a monument",
        Some(viewer),
        html! {
            h1 { "Add a monument" }
            (error_list(errors))
            (monument_form(&MonumentFormValues {
                action: "/addMonument".to_owned(),
                monument: None,
                categories,
                selected: &[],
            }))
        },
    )
}

/// Edit form with the monument's current categories preselected.
pub fn edit_page(
    viewer: &User,
    monument: &Monument,
    categories: &[String],
    selected: &[String],
    errors: &[String],
) -> Markup {
    document(
        "Edit Monument",
        Some(viewer),
        html! {
            h1 { "Edit " (monument.title) }
            (error_list(errors))
            (monument_form(&MonumentFormValues {
                action: format!("/editMonument/{}", monument.id),
                monument: Some(monument),
                categories,
                selected,
            }))
        },
    )
}

/// Inputs for the report page.
pub struct ReportView<'a> {
    pub heading: &'a str,
    pub monuments: &'a [Monument],
    pub provinces: &'a [CategoryWithMonuments],
    pub others: &'a [CategoryWithMonuments],
    /// Shown when the listing is filtered and matched something.
    pub result_count: Option<usize>,
}

fn category_nav(title: &str, categories: &[CategoryWithMonuments]) -> Markup {
    html! {
        section.category-nav {
            h2 { (title) }
            @for entry in categories {
                details {
                    summary { (entry.category.title) " (" (entry.monuments.len()) ")" }
                    ul {
                        @for monument in &entry.monuments {
                            li { a href={ "/viewMonument/" (monument.id) } { (monument.title) } }
                        }
                    }
                }
            }
        }
    }
}

/// Monument listing with the province and category navigation.
pub fn report_page(viewer: &User, view: &ReportView<'_>) -> Markup {
    document(
        view.heading,
        Some(viewer),
        html! {
            h1 { (view.heading) }
            @if let Some(count) = view.result_count {
                p.result-count { (count) " result" @if count != 1 { "s" } }
            }
            aside {
                (category_nav("Provinces", view.provinces))
                (category_nav("Categories", view.others))
            }
            @if view.monuments.is_empty() {
                p.empty { "No monuments found." }
            }
            table.monuments {
                tbody {
                    @for monument in view.monuments {
                        tr {
                            td { a href={ "/viewMonument/" (monument.id) } { (monument.title) } }
                            td { a href={ "/getCountyMonuments/" (monument.county) } { (monument.county) } }
                            td { (monument.province) }
                            td { a href={ "/editMonumentView/" (monument.id) } { "Edit" } }
                            td {
                                form method="post" action={ "/deleteMonument/" (monument.id) } {
                                    button.danger type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn weather_panel(weather: &WeatherSummary) -> Markup {
    html! {
        section.weather {
            h2 { "Weather" }
            @if !weather.weather_available {
                p.no-weather { "Weather data is not available for this location." }
            } @else {
                @if let Some(description) = &weather.current_weather_description {
                    p.conditions { (description) }
                }
                @if let Some(current) = &weather.current_weather_formatted_object {
                    dl {
                        dt { "Perceived temperature" } dd { (current.perceived_temperature) " °C" }
                        dt { "Pressure" } dd { (current.pressure) " hPa" }
                        dt { "Humidity" } dd { (current.humidity) " %" }
                        dt { "Wind speed" } dd { (current.wind_speed) " m/s" }
                    }
                }
                @if let Some(sunset) = &weather.formatted_sunset_time {
                    p { "Sunset: " (sunset) }
                }
                @if let Some(days) = &weather.weather_forecast_next_week {
                    table.forecast {
                        @for day in days {
                            tr { td { (day.date) } td { (day.summary) } td { (day.description) } }
                        }
                    }
                }
            }
        }
    }
}

/// One monument with its images, categories and weather.
pub fn monument_page(viewer: &User, details: &MonumentDetails, weather: &WeatherSummary) -> Markup {
    let monument = &details.monument;
    document(
        &monument.title,
        Some(viewer),
        html! {
            article.monument {
                h1 { (monument.title) }
                p.location { (monument.county) ", " (monument.province) }
                p.coordinates { (monument.coordinates.latitude) ", " (monument.coordinates.longitude) }
                p { (monument.description) }
                ul.tags {
                    @for title in &details.category_titles {
                        li { (title) }
                    }
                }
                div.gallery {
                    @for image in &details.images {
                        img src=(image.url) alt=(image.title) loading="lazy";
                    }
                }
                a href={ "/editMonumentView/" (monument.id) } { "Edit" }
            }
            (weather_panel(weather))
        },
    )
}

/// Error page for a failed page request.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    document(
        reason,
        None,
        html! {
            h1 { (status.as_u16()) " " (reason) }
            p { (message) }
            a href="/" { "Back to the start" }
        },
    )
}
