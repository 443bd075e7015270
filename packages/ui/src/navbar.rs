use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::FaHeart;
use crate::Icon;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Top bar with the product mark. `children` are the route links, which the
/// app supplies since it owns the route table.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();

    rsx! {
        document::Stylesheet { href: NAVBAR_CSS }
        nav {
            class: "navbar",
            div {
                class: "navbar-brand",
                span {
                    class: "navbar-logo",
                    Icon { icon: FaHeart, width: 16, height: 16 }
                }
                "HealthSync AI"
            }
            div {
                class: "navbar-links",
                {children}
            }
            if let Some(user) = auth().user {
                span {
                    class: "navbar-user",
                    title: "{user.email}",
                    "{user.display_name()}"
                }
            }
        }
    }
}
