use crate::web::router::{Link, use_router};
use farmgate::route::AppRoute;
use leptos::prelude::*;

const GOALS: [(&str, &str); 6] = [
    (
        "Empower Farmers",
        "Provide farmers with tools and platform to reach customers directly, increasing their income and reducing dependence on intermediaries.",
    ),
    (
        "Fair Pricing",
        "Eliminate middlemen markups by connecting buyers and sellers directly, ensuring both parties benefit from fair and transparent pricing.",
    ),
    (
        "Fresh Produce",
        "Deliver fresh, locally-sourced, and affordable agricultural products directly to consumers' doors while reducing food miles and carbon footprint.",
    ),
    (
        "Community Building",
        "Foster stronger connections between farmers and consumers, building trust and supporting local economies.",
    ),
    (
        "Sustainability",
        "Promote sustainable farming practices and environmentally responsible commerce that benefits both people and the planet.",
    ),
    (
        "Digital Innovation",
        "Leverage technology to make agricultural commerce accessible, efficient, and user-friendly for all participants.",
    ),
];

const VALUES: [(&str, &str); 4] = [
    ("Transparency", "We believe in honest and open communication between farmers and consumers."),
    ("Fairness", "Everyone involved in our platform deserves fair treatment and equitable opportunities."),
    ("Quality", "We're committed to providing the highest quality fresh produce and services."),
    ("Community", "We support local communities and believe in the power of collective growth."),
];

const IMPACT: [(&str, [&str; 4]); 3] = [
    (
        "For Farmers",
        [
            "Direct market access without intermediaries",
            "Better profit margins on produce",
            "Digital tools to manage sales",
            "Reduced post-harvest losses",
        ],
    ),
    (
        "For Consumers",
        [
            "Fresh, locally-sourced produce",
            "Better prices than retail markets",
            "Direct connection to farmers",
            "Support for local agriculture",
        ],
    ),
    (
        "For Communities",
        [
            "Stronger local economies",
            "Food security and availability",
            "Reduced food miles",
            "Sustainable agriculture growth",
        ],
    ),
];

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

#[component]
pub fn LearnMorePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="min-h-screen bg-base-200">
            <header class="navbar bg-base-100 shadow">
                <div class="flex-1">
                    <span class="btn btn-ghost text-xl">"EcoLabs"</span>
                </div>
                <div class="flex-none gap-2">
                    <Link to=AppRoute::Welcome class="btn btn-outline">"Home"</Link>
                    <Link to=AppRoute::Login class="btn btn-primary">"Login"</Link>
                </div>
            </header>

            <section class="hero py-12">
                <div class="hero-content text-center flex-col">
                    <h1 class="text-4xl font-bold">"Our Mission & Vision"</h1>
                    <p class="text-lg">"Transforming agriculture through direct farmer-to-consumer connections"</p>
                </div>
            </section>

            <section class="max-w-4xl mx-auto px-4 pb-8">
                <h2 class="text-2xl font-bold mb-2">"Our Mission"</h2>
                <p>
                    "EcoLabs is committed to empowering local farmers by creating a digital marketplace that connects them directly to consumers. We eliminate middlemen, ensure fair prices, and promote sustainable agriculture while providing fresh, locally-sourced produce to communities."
                </p>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-8">
                <h2 class="text-2xl font-bold mb-4 text-center">"Our Goals"</h2>
                <div class="grid md:grid-cols-3 gap-6">
                    {GOALS
                        .into_iter()
                        .map(|(title, text)| {
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h3 class="card-title">{title}</h3>
                                        <p>{text}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-8">
                <h2 class="text-2xl font-bold mb-4 text-center">"Our Core Values"</h2>
                <div class="grid md:grid-cols-4 gap-4">
                    {VALUES
                        .into_iter()
                        .map(|(title, text)| view! {
                            <div>
                                <h3 class="font-semibold">{title}</h3>
                                <p class="text-sm">{text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-8">
                <h2 class="text-2xl font-bold mb-4 text-center">"Our Impact"</h2>
                <div class="grid md:grid-cols-3 gap-6">
                    {IMPACT
                        .into_iter()
                        .map(|(title, points)| view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h4 class="card-title">{title}</h4>
                                    <ul class="list-disc list-inside">
                                        {points.into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                                    </ul>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="text-center py-12">
                <h2 class="text-3xl font-bold">"Ready to Make a Difference?"</h2>
                <p class="mb-6">"Join EcoLabs and be part of the agricultural revolution."</p>
                <div class="flex justify-center gap-4">
                    <button class="btn btn-primary" on:click=move |_| router.navigate_to(AppRoute::Dashboard)>
                        "Explore Marketplace"
                    </button>
                    <button class="btn btn-outline" on:click=move |_| router.navigate_to(AppRoute::Login)>
                        "Join Us Today"
                    </button>
                </div>
            </section>

            <footer class="footer footer-center p-4 bg-base-300">
                <p>"© " {current_year()} " EcoLabs. All rights reserved."</p>
            </footer>
        </div>
    }
}
