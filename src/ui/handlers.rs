//! Web UI handlers

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::api::server::SharedState;
use crate::auth::middleware::SessionEvidence;
use crate::auth::models::{LoginRequest, Profile};
use crate::auth::session::{require_session, Navigation, SessionContext};
use crate::auth::token;
use crate::ui::nav::{self, NavItem};

/// Snapshot of the session carried by this request's cookies
fn session_from(state: &SharedState, headers: &HeaderMap) -> SessionContext {
    SessionContext::from_evidence(&SessionEvidence::from_headers(headers, &state.config.auth))
}

/// Redirect when the page-level check says the session is not usable
fn mount_check(state: &SharedState, ctx: &SessionContext, path: &str) -> Option<Response> {
    require_session(ctx, &state.guard, path)
        .map(|Navigation::To(to)| Redirect::to(&to).into_response())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_nav(items: &[NavItem]) -> String {
    items
        .iter()
        .map(|item| {
            let class = if item.admin_only {
                "block px-4 py-2 bg-purple-600 hover:bg-purple-700 rounded font-medium"
            } else {
                "block px-4 py-2 hover:bg-gray-700 rounded"
            };
            format!(r#"<a href="{}" class="{}">{}</a>"#, item.href, class, escape(&item.label))
        })
        .collect()
}

/// Page chrome shared by all signed-in pages
fn layout(ctx: &SessionContext, title: &str, body: &str) -> String {
    let (name, email, role) = match ctx.user.as_ref() {
        Some(user) => (escape(&user.name), escape(&user.email), user.role.to_string()),
        None => (String::new(), String::new(), "User".to_string()),
    };

    format!(
        r#"
<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Elegant Steel Hardware</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    <div class="flex h-screen">
        <div class="w-64 bg-gray-800 border-r border-gray-700 overflow-y-auto">
            <div class="p-6">
                <h1 class="text-2xl font-bold mb-1">Elegant Steel</h1>
                <p class="text-gray-400 text-xs mb-8">{role}</p>
                <nav class="space-y-2">
                    {nav}
                </nav>
            </div>
        </div>

        <div class="flex-1 overflow-auto">
            <div class="container mx-auto px-8 py-8 max-w-6xl">
                <header class="mb-8 flex justify-between items-start">
                    <h2 class="text-3xl font-bold">{title}</h2>
                    <div class="text-right">
                        <p class="text-sm">{name}</p>
                        <p class="text-xs text-gray-400">{email}</p>
                        <form method="post" action="/logout" class="mt-2">
                            <button class="px-3 py-1 text-xs bg-red-600 hover:bg-red-700 rounded">Logout</button>
                        </form>
                    </div>
                </header>
                {body}
            </div>
        </div>
    </div>
</body>
</html>
        "#,
        title = escape(title),
        role = role,
        nav = render_nav(&nav::compose(ctx)),
        name = name,
        email = email,
        body = body,
    )
}

fn login_html(error: Option<&str>) -> String {
    let error_block = error
        .map(|e| {
            format!(
                r#"<div class="mb-6 p-4 bg-red-500/20 border border-red-500/50 rounded-lg text-red-300 text-sm">{}</div>"#,
                escape(e)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sign In - Elegant Steel Hardware</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen flex items-center justify-center p-4">
    <div class="max-w-md w-full bg-gray-800 rounded-lg p-8 shadow-xl">
        <h1 class="text-2xl font-bold mb-6">Sign In</h1>
        {error_block}
        <form method="post" action="/login" class="space-y-4">
            <div>
                <label class="block text-sm font-semibold mb-2" for="email">Email Address</label>
                <input id="email" name="email" type="email" required
                    class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded text-white focus:outline-none focus:border-blue-500"/>
            </div>
            <div>
                <label class="block text-sm font-semibold mb-2" for="password">Password</label>
                <input id="password" name="password" type="password" required
                    class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded text-white focus:outline-none focus:border-blue-500"/>
            </div>
            <button type="submit" class="w-full px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium">Sign In</button>
        </form>
        <div class="mt-6 p-4 bg-gray-700/40 rounded text-xs text-gray-400">
            <p class="text-gray-300 mb-2"><strong>Demo Credentials:</strong></p>
            <p>Admin: admin@elegantsteelhw.com / password123</p>
            <p>Employee: employee@elegantsteelhw.com / password123</p>
        </div>
    </div>
</body>
</html>
        "#,
        error_block = error_block
    )
}

/// Root redirects to the landing section
pub async fn root(State(state): State<SharedState>) -> Redirect {
    Redirect::to(&state.config.auth.home_path)
}

/// Login form
pub async fn login_page() -> Html<String> {
    Html(login_html(None))
}

/// Form login: sets the session cookies the route guard looks for
pub async fn login_form(
    State(state): State<SharedState>,
    Form(req): Form<LoginRequest>,
) -> Response {
    let Some((email, password)) = req.credentials() else {
        return (
            StatusCode::BAD_REQUEST,
            Html(login_html(Some("Email and password are required"))),
        )
            .into_response();
    };

    let user = match state.credentials.authenticate(email, password) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Form login failed for {}", email);
            return (
                StatusCode::UNAUTHORIZED,
                Html(login_html(Some(&e.to_string()))),
            )
                .into_response();
        }
    };

    tracing::info!("User {} signed in ({})", user.email, user.role);

    let auth = &state.config.auth;
    let cookies = match session_cookies(auth, &user) {
        Ok(cookies) => cookies,
        Err(e) => return e.into_response(),
    };

    (AppendHeaders(cookies), Redirect::to(&auth.home_path)).into_response()
}

fn session_cookies(
    auth: &crate::config::AuthConfig,
    user: &Profile,
) -> crate::error::Result<[(header::HeaderName, String); 2]> {
    let profile_json = serde_json::to_string(user)?;
    Ok([
        (
            header::SET_COOKIE,
            format!("{}={}; Path=/; SameSite=Lax", auth.token_cookie, token::issue(user)),
        ),
        (
            header::SET_COOKIE,
            format!(
                "{}={}; Path=/; SameSite=Lax",
                auth.user_cookie,
                urlencoding::encode(&profile_json)
            ),
        ),
    ])
}

/// Clear both session cookies and go back to login
pub async fn logout(State(state): State<SharedState>) -> Response {
    let auth = &state.config.auth;
    let expire = |name: &str| {
        (
            header::SET_COOKIE,
            format!("{}=; Path=/; Max-Age=0; SameSite=Lax", name),
        )
    };

    (
        AppendHeaders([expire(&auth.token_cookie), expire(&auth.user_cookie)]),
        Redirect::to(&auth.login_path),
    )
        .into_response()
}

/// Placeholder page for each workshop section
pub async fn section_page(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let Some(section) = nav::find_section(&slug) else {
        return not_found().await.into_response();
    };

    let ctx = session_from(&state, &headers);
    if let Some(redirect) = mount_check(&state, &ctx, uri.path()) {
        return redirect;
    }

    let body = format!(
        r#"<div class="bg-gray-800 rounded-lg p-6"><p class="text-gray-400">{}</p></div>"#,
        section.blurb
    );
    Html(layout(&ctx, section.title, &body)).into_response()
}

/// User management, admins only
pub async fn manage_users(
    State(state): State<SharedState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let ctx = session_from(&state, &headers);
    if let Some(redirect) = mount_check(&state, &ctx, uri.path()) {
        return redirect;
    }

    if !ctx.is_admin() {
        let body = r#"<div class="bg-gray-800 rounded-lg p-6"><p class="text-red-400">Only administrators can manage users.</p></div>"#;
        return (StatusCode::FORBIDDEN, Html(layout(&ctx, "Manage Users", body))).into_response();
    }

    let rows: String = state
        .credentials
        .records()
        .iter()
        .map(|r| r.profile())
        .map(|p| {
            format!(
                r#"<tr class="border-b border-gray-700"><td class="px-4 py-3">{}</td><td class="px-4 py-3">{}</td><td class="px-4 py-3">{}</td><td class="px-4 py-3">{}</td></tr>"#,
                escape(&p.name),
                escape(&p.email),
                p.role,
                escape(&p.status)
            )
        })
        .collect();

    let body = format!(
        r#"
<div class="bg-gray-800 rounded-lg overflow-hidden shadow-xl">
    <table class="w-full">
        <thead class="bg-gray-700">
            <tr>
                <th class="px-4 py-3 text-left text-sm font-semibold">Name</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Email</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Role</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Status</th>
            </tr>
        </thead>
        <tbody>{}</tbody>
    </table>
</div>"#,
        rows
    );

    Html(layout(&ctx, "Manage Users", &body)).into_response()
}

pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html(r#"<!DOCTYPE html><html><body><h1>Not found</h1><a href="/">Home</a></body></html>"#),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_login_html_error_slot() {
        assert!(!login_html(None).contains("bg-red-500/20"));
        let page = login_html(Some("Invalid email or password"));
        assert!(page.contains("Invalid email or password"));
    }
}
