//! The link-in-bio card: brand header, link list and footer.

use leptos::prelude::*;
use serde::Deserialize;

/// Logo shown when the page data does not name one.
pub const DEFAULT_LOGO: &str = "/logo.png";

/// Icon drawn in front of a link label.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkIcon {
	/// Instagram profile.
	Instagram,
	/// Facebook page.
	Facebook,
	/// WhatsApp chat.
	Whatsapp,
	/// Email address.
	Mail,
	/// Any other site.
	External,
}

impl LinkIcon {
	/// Guesses an icon from the link target.
	pub fn for_href(href: &str) -> Self {
		let href = href.to_ascii_lowercase();
		if href.starts_with("mailto:") {
			Self::Mail
		} else if href.contains("instagram.com") {
			Self::Instagram
		} else if href.contains("facebook.com") {
			Self::Facebook
		} else if href.contains("wa.me") || href.contains("whatsapp.com") {
			Self::Whatsapp
		} else {
			Self::External
		}
	}

	/// Modifier used in the `link__icon--*` CSS class.
	pub fn slug(self) -> &'static str {
		match self {
			Self::Instagram => "instagram",
			Self::Facebook => "facebook",
			Self::Whatsapp => "whatsapp",
			Self::Mail => "mail",
			Self::External => "external",
		}
	}

	fn glyph(self) -> &'static str {
		match self {
			Self::Instagram => "◎",
			Self::Facebook => "f",
			Self::Whatsapp => "✆",
			Self::Mail => "✉",
			Self::External => "↗",
		}
	}
}

/// One outbound link on the card.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LinkItem {
	/// Visible label, e.g. "Instagram".
	pub label: String,
	/// Destination URL (`https:`, `mailto:`, ...).
	pub href: String,
	/// One-line blurb under the label.
	#[serde(default)]
	pub description: String,
	/// Explicit icon; inferred from `href` when absent.
	#[serde(default)]
	pub icon: Option<LinkIcon>,
}

impl LinkItem {
	/// Icon to draw for this link.
	pub fn icon(&self) -> LinkIcon {
		self.icon.unwrap_or_else(|| LinkIcon::for_href(&self.href))
	}
}

/// Everything the card displays. Missing fields fall back to the defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageData {
	/// Brand name, used in the title, logo alt text and copyright line.
	pub brand: String,
	/// Card heading.
	pub title: String,
	/// Paragraph under the heading.
	pub tagline: String,
	/// Logo image URL. Defaults to [`DEFAULT_LOGO`]; `null` hides the logo.
	pub logo: Option<String>,
	/// Links in display order.
	pub links: Vec<LinkItem>,
	/// Line above the copyright notice.
	pub footer: String,
}

impl Default for PageData {
	fn default() -> Self {
		let link = |label: &str, href: &str, description: &str| LinkItem {
			label: label.into(),
			href: href.into(),
			description: description.into(),
			icon: None,
		};
		Self {
			brand: "DryAura".into(),
			title: "Join Our Flavor Journey!".into(),
			tagline: "Experience nature's finest snacks with our hand-selected, premium dry fruits. \
				Sustainably sourced, carefully packaged in eco-friendly materials, and delivered \
				with the purity you deserve."
				.into(),
			logo: Some(DEFAULT_LOGO.into()),
			links: vec![
				link(
					"Instagram",
					"https://instagram.com/dryaura",
					"Follow for daily inspiration and offers",
				),
				link(
					"Facebook",
					"https://facebook.com/dryaura",
					"Join our community of health enthusiasts",
				),
				link(
					"WhatsApp",
					"https://wa.me/yournumber",
					"Chat directly for orders and queries",
				),
				link("Online Store", "https://dryaura.com", "Shop our premium collection"),
				link(
					"Contact Us",
					"mailto:contact@dryaura.com",
					"We'd love to hear from you",
				),
			],
			footer: "Premium Dry Fruits • Eco-Friendly Packaging • Healthy Lifestyle".into(),
		}
	}
}

/// Themed card presenting the page's links. `on_toggle` flips the theme.
#[component]
pub fn LinkCard(
	/// Content to display.
	data: PageData,
	/// Current theme.
	#[prop(into)]
	dark: Signal<bool>,
	/// Called when the theme button is pressed.
	#[prop(into)]
	on_toggle: Callback<()>,
) -> impl IntoView {
	let PageData {
		brand,
		title,
		tagline,
		logo,
		links,
		footer,
	} = data;
	let copyright = format!("© {} {}. All rights reserved.", current_year(), brand);
	let theme_class = move |base: &'static str| {
		if dark.get() {
			format!("{base} {base}--dark")
		} else {
			format!("{base} {base}--light")
		}
	};

	view! {
		<div class=move || theme_class("card")>
			<button
				class=move || theme_class("theme-toggle")
				aria-label="Toggle theme"
				on:click=move |_| on_toggle.run(())
			>
				{move || if dark.get() { "☀" } else { "☾" }}
			</button>

			{logo.map(|src| view! {
				<div class="card__logo">
					<img src=src alt=format!("{brand} logo") width="120" height="120" />
				</div>
			})}

			<h1 class="card__title">{title}</h1>
			<p class="card__tagline">{tagline}</p>

			<nav class="card__links">
				{links
					.into_iter()
					.map(|link| {
						let icon = link.icon();
						view! {
							<a
								class=move || theme_class("link")
								href=link.href
								target="_blank"
								rel="noopener noreferrer"
							>
								<span
									class=format!("link__icon link__icon--{}", icon.slug())
									aria-hidden="true"
								>
									{icon.glyph()}
								</span>
								<span class="link__label">{link.label}</span>
								<span class="link__description">{link.description}</span>
							</a>
						}
					})
					.collect_view()}
			</nav>

			<footer class="card__footer">
				<p>{footer}</p>
				<p>{copyright}</p>
			</footer>
		</div>
	}
}

fn current_year() -> u32 {
	js_sys::Date::new_0().get_full_year()
}
