use crate::web::router::{Link, use_router};
use farmgate::route::AppRoute;
use leptos::prelude::*;

const FEATURES: [(&str, &str); 3] = [
    (
        "Support Local Farmers",
        "Farmers earn 40% more by selling directly to buyers. Eliminate intermediaries and middlemen.",
    ),
    (
        "Fresh & Affordable",
        "Get locally sourced, farm-fresh produce at prices 30% lower than traditional markets.",
    ),
    (
        "Fair & Transparent",
        "Complete transparency in pricing, sourcing, and transactions. No hidden fees or surprises.",
    ),
];

const STATS: [(&str, &str); 3] = [
    ("500+", "Active Farmers"),
    ("50K+", "Happy Customers"),
    ("₱10M+", "Farmer Income"),
];

#[component]
pub fn WelcomePage() -> impl IntoView {
    let router = use_router();
    let (email, set_email) = signal(String::new());

    // 订阅表单只清空输入，没有后端接口
    let on_newsletter = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_email.set(String::new());
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <header class="navbar bg-base-100 shadow">
                <div class="flex-1">
                    <span class="btn btn-ghost text-xl">"EcoLabs"</span>
                </div>
                <div class="flex-none">
                    <Link to=AppRoute::Login class="btn btn-primary">"Login"</Link>
                </div>
            </header>

            <section class="hero py-16">
                <div class="hero-content text-center flex-col max-w-3xl">
                    <h1 class="text-5xl font-bold">"Empowering Local Farmers"</h1>
                    <p class="text-xl">"Connect directly with farmers. Fair prices, fresh produce, no middlemen."</p>
                    <p class="text-base-content/70">
                        "EcoLabs is a digital marketplace that connects communities with fresh, locally-sourced produce while ensuring farmers receive fair compensation."
                    </p>
                    <div class="flex gap-4 mt-4">
                        <button class="btn btn-primary" on:click=move |_| router.navigate_to(AppRoute::Dashboard)>
                            "Get Started Today"
                        </button>
                        <button class="btn btn-outline" on:click=move |_| router.navigate_to(AppRoute::LearnMore)>
                            "Explore Features"
                        </button>
                    </div>
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-8">
                <div class="text-center mb-8">
                    <h2 class="text-3xl font-bold">"Why Choose EcoLabs?"</h2>
                    <p class="text-base-content/70">"Three core values that drive our mission"</p>
                </div>
                <div class="grid md:grid-cols-3 gap-6">
                    {FEATURES
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

            <section class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                {STATS
                    .into_iter()
                    .map(|(value, label)| {
                        view! {
                            <div class="stat place-items-center">
                                <div class="stat-value text-primary">{value}</div>
                                <div class="stat-desc">{label}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="text-center py-16">
                <h2 class="text-3xl font-bold">"Ready to Make a Difference?"</h2>
                <p class="mb-6">"Join thousands of farmers and consumers transforming the agricultural market."</p>
                <button class="btn btn-primary btn-lg" on:click=move |_| router.navigate_to(AppRoute::Dashboard)>
                    "Start Your Journey"
                </button>
            </section>

            <footer class="footer p-10 bg-neutral text-neutral-content">
                <div>
                    <h4 class="footer-title">"EcoLabs"</h4>
                    <p>"Connecting farmers to consumers. Fair trade. Fresh produce. Better prices."</p>
                </div>
                <div>
                    <h4 class="footer-title">"Quick Links"</h4>
                    <Link to=AppRoute::Dashboard class="link link-hover">"Get Started"</Link>
                    <Link to=AppRoute::LearnMore class="link link-hover">"Learn More"</Link>
                    <Link to=AppRoute::Login class="link link-hover">"Login"</Link>
                </div>
                <form on:submit=on_newsletter class="form-control">
                    <h4 class="footer-title">"Newsletter"</h4>
                    <div class="join">
                        <input
                            type="email"
                            placeholder="Your email"
                            class="input input-bordered join-item text-base-content"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <button class="btn btn-primary join-item">"Subscribe"</button>
                    </div>
                </form>
            </footer>
        </div>
    }
}
