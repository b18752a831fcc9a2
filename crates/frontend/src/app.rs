use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::app_shell::AppShell;
use crate::domain::a001_purchase::ui::list::PurchaseList;
use crate::domain::a002_delivery::ui::list::DeliveryList;
use crate::domain::a003_disposal::ui::list::DisposalList;
use crate::domain::a004_production::ui::list::ProductionList;
use crate::domain::a005_stock_movement::ui::list::StockMovementList;
use crate::shared::config::AppConfig;
use crate::shared::notifications::{ToastArea, ToastService};
use crate::system::auth::AuthProvider;
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::list::UsersList;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("API base: {}", config.api_base);
    provide_context(config);
    provide_context(ToastService::new());

    view! {
        <Router>
            <AuthProvider>
                <Routes fallback=|| view! { <div class="page__empty">"Страница не найдена"</div> }>
                    <Route path=path!("/login") view=LoginPage />
                    <ParentRoute path=path!("") view=AppShell>
                        <Route path=path!("") view=|| view! { <Redirect path="/purchases" /> } />
                        <Route path=path!("purchases") view=PurchaseList />
                        <Route path=path!("deliveries") view=DeliveryList />
                        <Route path=path!("disposals") view=DisposalList />
                        <Route path=path!("productions") view=ProductionList />
                        <Route path=path!("stock-movements") view=StockMovementList />
                        <Route path=path!("users") view=UsersList />
                    </ParentRoute>
                </Routes>
            </AuthProvider>
        </Router>
        <ToastArea />
    }
}
