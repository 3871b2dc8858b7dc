//! eframe shell. Each frame drains worker events, paints the header,
//! catalog grid, and the current modal from cloned view-state snapshots,
//! and turns clicks and edits into bus emissions. Snapshots are cloned
//! before painting so a handler fired mid-frame can freely rewrite view
//! state for the next frame.

use std::time::Duration;

use crossbeam_channel::Receiver;
use serde_json::json;
use shared::{domain::CatalogItem, topics};

use crate::{
    controller::{events::UiEvent, orchestration},
    ui::views::{CardOptions, ModalContent},
};

pub struct StorefrontApp {
    wiring: orchestration::Wiring,
    ui_rx: Receiver<UiEvent>,
}

struct CardResponse {
    /// The card's whole surface; callers that treat the card as a click
    /// target interact with this.
    surface: egui::Response,
    buy_clicked: bool,
}

impl StorefrontApp {
    pub fn new(wiring: orchestration::Wiring, ui_rx: Receiver<UiEvent>) -> Self {
        Self { wiring, ui_rx }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            orchestration::handle_ui_event(&self.wiring, event);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        let locked = self.wiring.views.page.locked();
        let counter = self.wiring.views.page.counter();
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if locked {
                ui.disable();
            }
            ui.horizontal(|ui| {
                ui.heading("Storefront");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(format!("Cart ({counter})")).clicked() {
                        self.wiring.bus.notify(topics::CART_OPEN);
                    }
                });
            });
        });
    }

    fn show_catalog(&self, ctx: &egui::Context) {
        let locked = self.wiring.views.page.locked();
        let cards = self.wiring.views.catalog.cards();
        egui::CentralPanel::default().show(ctx, |ui| {
            if locked {
                ui.disable();
            }
            if cards.is_empty() {
                ui.weak("No products yet.");
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for item in &cards {
                        let card = render_card(ui, item, CardOptions::catalog_card(), false);
                        if card.surface.interact(egui::Sense::click()).clicked() {
                            self.wiring
                                .bus
                                .emit(topics::ITEM_SELECT, json!({"id": item.id.as_str()}));
                        }
                    }
                });
            });
        });
    }

    fn show_modal(&self, ctx: &egui::Context) {
        let Some(content) = self.wiring.views.modal.content() else {
            return;
        };
        let title = match content {
            ModalContent::Detail => "Product",
            ModalContent::Cart => "Cart",
            ModalContent::OrderForm => "Checkout: payment",
            ModalContent::ContactsForm => "Checkout: contacts",
            ModalContent::Success => "Order placed",
        };
        let mut open = true;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| match content {
                ModalContent::Detail => self.show_detail(ui),
                ModalContent::Cart => self.show_cart(ui),
                ModalContent::OrderForm => self.show_order_form(ui),
                ModalContent::ContactsForm => self.show_contacts_form(ui),
                ModalContent::Success => self.show_success(ui),
            });
        if !open {
            self.wiring.views.modal.close();
        }
    }

    fn show_detail(&self, ui: &mut egui::Ui) {
        let Some(detail) = self.wiring.views.detail.state() else {
            ui.weak("This product is no longer available.");
            return;
        };
        let buy_enabled = !detail.in_cart && detail.item.price.is_some();
        let response = render_card(ui, &detail.item, CardOptions::detail_panel(), buy_enabled);
        if detail.in_cart {
            ui.weak("Already in your cart.");
        } else if detail.item.price.is_none() {
            ui.weak("Not for individual sale.");
        }
        if response.buy_clicked {
            self.wiring
                .bus
                .emit(topics::ITEM_BUY, json!({"id": detail.item.id.as_str()}));
        }
    }

    fn show_cart(&self, ui: &mut egui::Ui) {
        let rows = self.wiring.views.cart.rows();
        let total = self.wiring.views.cart.total();
        let order_enabled = self.wiring.views.cart.order_enabled();

        if rows.is_empty() {
            ui.weak("Your cart is empty.");
        }
        for (index, row) in rows.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.monospace(format!("{}", index + 1));
                render_card(ui, row, CardOptions::cart_row(), false);
                ui.label(price_label(row.price));
                if ui.button("Remove").clicked() {
                    self.wiring
                        .bus
                        .emit(topics::CART_ITEM_DELETE, json!({"id": row.id.as_str()}));
                }
            });
        }
        ui.separator();
        ui.label(format!("Total: {}", price_label(Some(total))));
        if ui
            .add_enabled(order_enabled, egui::Button::new("Checkout"))
            .clicked()
        {
            self.wiring.bus.notify(topics::ORDER_OPEN);
        }
    }

    fn show_order_form(&self, ui: &mut egui::Ui) {
        let form = &self.wiring.views.order_form;
        let current_payment = form.payment.borrow().clone();
        let emit_payment = self
            .wiring
            .bus
            .trigger(topics::order_field_change("payment"), json!({"field": "payment"}));

        ui.horizontal(|ui| {
            ui.label("Payment:");
            for method in ["card", "cash"] {
                if ui
                    .selectable_label(current_payment == method, method)
                    .clicked()
                {
                    *form.payment.borrow_mut() = method.to_string();
                    emit_payment(json!({"value": method}));
                }
            }
        });

        ui.label("Delivery address:");
        let address_changed = {
            let mut address = form.address.borrow_mut();
            ui.text_edit_singleline(&mut *address).changed()
        };
        if address_changed {
            let address = form.address.borrow().clone();
            let emit_address = self
                .wiring
                .bus
                .trigger(topics::order_field_change("address"), json!({"field": "address"}));
            emit_address(json!({"value": address}));
        }

        show_form_footer(ui, &form.errors(), form.valid(), "Next", || {
            self.wiring.bus.notify(topics::ORDER_SUBMIT);
        });
    }

    fn show_contacts_form(&self, ui: &mut egui::Ui) {
        let form = &self.wiring.views.contacts_form;

        ui.label("Email:");
        let email_changed = {
            let mut email = form.email.borrow_mut();
            ui.text_edit_singleline(&mut *email).changed()
        };
        if email_changed {
            let email = form.email.borrow().clone();
            let emit_email = self
                .wiring
                .bus
                .trigger(topics::contacts_field_change("email"), json!({"field": "email"}));
            emit_email(json!({"value": email}));
        }

        ui.label("Phone:");
        let phone_changed = {
            let mut phone = form.phone.borrow_mut();
            ui.text_edit_singleline(&mut *phone).changed()
        };
        if phone_changed {
            let phone = form.phone.borrow().clone();
            let emit_phone = self
                .wiring
                .bus
                .trigger(topics::contacts_field_change("phone"), json!({"field": "phone"}));
            emit_phone(json!({"value": phone}));
        }

        show_form_footer(ui, &form.errors(), form.valid(), "Pay", || {
            self.wiring.bus.notify(topics::CONTACTS_SUBMIT);
        });
    }

    fn show_success(&self, ui: &mut egui::Ui) {
        let total = self.wiring.views.success.total();
        ui.label(format!("Charged {}", price_label(Some(total))));
        if ui.button("Back to shopping").clicked() {
            self.wiring.bus.notify(topics::SUCCESS_SUBMIT);
        }
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_header(ctx);
        self.show_catalog(ctx);
        self.show_modal(ctx);
        // Worker events arrive between frames; poll at a steady cadence.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// The one product-card renderer, parameterized by capability flags.
fn render_card(
    ui: &mut egui::Ui,
    item: &CatalogItem,
    options: CardOptions,
    buy_enabled: bool,
) -> CardResponse {
    let mut buy_clicked = false;
    let surface = ui
        .group(|ui| {
            ui.vertical(|ui| {
                if options.show_category {
                    ui.weak(&item.category);
                }
                ui.strong(&item.title).on_hover_text(&item.image);
                if options.show_description {
                    ui.label(&item.description);
                }
                ui.label(price_label(item.price));
                if options.show_buy_button {
                    buy_clicked = ui
                        .add_enabled(buy_enabled, egui::Button::new("Buy"))
                        .clicked();
                }
            });
        })
        .response;
    CardResponse {
        surface,
        buy_clicked,
    }
}

fn show_form_footer(
    ui: &mut egui::Ui,
    errors: &str,
    valid: bool,
    submit_label: &str,
    on_submit: impl FnOnce(),
) {
    if !errors.is_empty() {
        ui.colored_label(egui::Color32::LIGHT_RED, errors);
    }
    if ui
        .add_enabled(valid, egui::Button::new(submit_label))
        .clicked()
    {
        on_submit();
    }
}

fn price_label(price: Option<i64>) -> String {
    match price {
        Some(value) => format!("{value} credits"),
        None => "Priceless".to_string(),
    }
}
