// src/cart.rs
//
// Agregador de carrinho: um reducer puro sobre linhas de itens, espelhando o
// comportamento da vitrine. O estado é serializável (serde) e é persistido
// pelo cliente sob uma chave fixa de local storage; nada aqui é durável no
// servidor antes do checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalog::{Product, SelectedOption};
use crate::models::orders::PaymentMethod;

// Chave usada pelo cliente para persistir o carrinho entre reloads.
pub const CART_STORAGE_KEY: &str = "cart-storage";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub observations: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    // Preço unitário com opções, congelado no momento do add-to-cart.
    // Mudanças de preço no catálogo não afetam o que já está no carrinho.
    pub calculated_price: Option<Decimal>,
}

impl CartItem {
    pub fn unit_price(&self) -> Decimal {
        self.calculated_price.unwrap_or(self.product.price)
    }
}

// Identidade de uma linha: produto + conjunto de opções normalizado por
// ordenação, para que a ordem de seleção não crie linhas duplicadas.
fn normalized_options(options: &[SelectedOption]) -> Vec<SelectedOption> {
    let mut sorted = options.to_vec();
    sorted.sort_by(|a, b| {
        (a.option_id, a.option_value_id).cmp(&(b.option_id, b.option_value_id))
    });
    sorted
}

fn same_identity(
    product_a: Uuid,
    options_a: &[SelectedOption],
    product_b: Uuid,
    options_b: &[SelectedOption],
) -> bool {
    product_a == product_b && normalized_options(options_a) == normalized_options(options_b)
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adiciona um produto ao carrinho. Mesma identidade (produto + opções)
    /// soma a quantidade e sobrescreve as observações (last write wins);
    /// identidade nova vira uma linha nova.
    pub fn add_item(
        &mut self,
        product: Product,
        quantity: u32,
        observations: Option<String>,
        selected_options: Vec<SelectedOption>,
        total_price: Option<Decimal>,
    ) {
        let existing = self.items.iter_mut().find(|item| {
            same_identity(item.product.id, &item.selected_options, product.id, &selected_options)
        });

        match existing {
            Some(item) => {
                item.quantity += quantity;
                item.observations = observations;
            }
            None => {
                // Usar preço calculado (com opções) se fornecido, senão o preço base
                let calculated_price = Some(total_price.unwrap_or(product.price));
                self.items.push(CartItem {
                    product,
                    quantity,
                    observations,
                    selected_options,
                    calculated_price,
                });
            }
        }
    }

    /// Remove uma linha. Com opções, remove exatamente a linha daquela
    /// identidade; sem opções, remove a primeira linha sem opções do produto.
    pub fn remove_item(&mut self, product_id: Uuid, selected_options: Option<&[SelectedOption]>) {
        match selected_options {
            Some(options) if !options.is_empty() => {
                self.items.retain(|item| {
                    !same_identity(item.product.id, &item.selected_options, product_id, options)
                });
            }
            _ => {
                let pos = self
                    .items
                    .iter()
                    .position(|item| item.product.id == product_id && item.selected_options.is_empty());
                if let Some(pos) = pos {
                    self.items.remove(pos);
                }
            }
        }
    }

    /// Define (não incrementa) a quantidade da linha. Quantidade zero ou
    /// negativa equivale a remover a linha.
    pub fn update_quantity(
        &mut self,
        product_id: Uuid,
        quantity: i32,
        selected_options: Option<&[SelectedOption]>,
    ) {
        if quantity <= 0 {
            self.remove_item(product_id, selected_options);
            return;
        }

        let target = self.items.iter_mut().find(|item| match selected_options {
            Some(options) if !options.is_empty() => {
                same_identity(item.product.id, &item.selected_options, product_id, options)
            }
            _ => item.product.id == product_id && item.selected_options.is_empty(),
        });

        if let Some(item) = target {
            item.quantity = quantity as u32;
        }
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    pub fn get_total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.unit_price() * Decimal::from(item.quantity))
            .sum()
    }

    pub fn get_item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Total a pagar no checkout: pix tem 5% de desconto, os demais métodos
/// pagam o valor cheio.
pub fn checkout_total(total: Decimal, payment_method: PaymentMethod) -> Decimal {
    match payment_method {
        PaymentMethod::Pix => total * Decimal::new(95, 2),
        PaymentMethod::Card | PaymentMethod::Cash => total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn produto(id: Uuid, nome: &str, preco: Decimal) -> Product {
        Product {
            id,
            name: nome.to_string(),
            description: None,
            price: preco,
            image: None,
            category_id: None,
            available: true,
            restaurant_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn opcao(option_id: Uuid, value_id: Uuid, delta: Decimal) -> SelectedOption {
        SelectedOption {
            option_id,
            option_value_id: value_id,
            price_modifier: delta,
        }
    }

    #[test]
    fn adicionar_duas_vezes_soma_quantidade_em_uma_linha() {
        let mut cart = CartStore::new();
        let burger = produto(Uuid::new_v4(), "X-Burger", Decimal::new(2000, 2));

        cart.add_item(burger.clone(), 1, None, vec![], None);
        cart.add_item(burger, 2, None, vec![], None);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.get_item_count(), 3);
    }

    #[test]
    fn observacoes_sao_sobrescritas_no_merge() {
        let mut cart = CartStore::new();
        let burger = produto(Uuid::new_v4(), "X-Burger", Decimal::new(2000, 2));

        cart.add_item(burger.clone(), 1, Some("sem cebola".into()), vec![], None);
        cart.add_item(burger, 1, Some("bem passado".into()), vec![], None);

        assert_eq!(cart.items()[0].observations.as_deref(), Some("bem passado"));
    }

    #[test]
    fn conjuntos_de_opcoes_diferentes_geram_linhas_distintas() {
        let mut cart = CartStore::new();
        let pizza = produto(Uuid::new_v4(), "Pizza", Decimal::new(4000, 2));
        let tamanho = Uuid::new_v4();
        let pequena = opcao(tamanho, Uuid::new_v4(), Decimal::ZERO);
        let grande = opcao(tamanho, Uuid::new_v4(), Decimal::new(500, 2));

        cart.add_item(pizza.clone(), 1, None, vec![pequena.clone()], None);
        cart.add_item(pizza, 1, None, vec![grande.clone()], None);

        assert_eq!(cart.items().len(), 2);

        // Remover pelo conjunto A só afeta a linha A
        cart.remove_item(cart.items()[0].product.id, Some(&[pequena]));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].selected_options, vec![grande]);
    }

    #[test]
    fn ordem_das_opcoes_nao_cria_linha_duplicada() {
        let mut cart = CartStore::new();
        let pizza = produto(Uuid::new_v4(), "Pizza", Decimal::new(4000, 2));
        let a = opcao(Uuid::new_v4(), Uuid::new_v4(), Decimal::ZERO);
        let b = opcao(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(300, 2));

        cart.add_item(pizza.clone(), 1, None, vec![a.clone(), b.clone()], None);
        cart.add_item(pizza, 1, None, vec![b, a], None);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn remover_sem_opcoes_nao_toca_linhas_com_opcoes() {
        let mut cart = CartStore::new();
        let lanche = produto(Uuid::new_v4(), "Lanche", Decimal::new(1500, 2));
        let extra = opcao(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(200, 2));

        cart.add_item(lanche.clone(), 1, None, vec![extra], None);
        cart.add_item(lanche.clone(), 1, None, vec![], None);

        cart.remove_item(lanche.id, None);

        assert_eq!(cart.items().len(), 1);
        assert!(!cart.items()[0].selected_options.is_empty());
    }

    #[test]
    fn quantidade_zero_remove_a_linha() {
        let mut cart = CartStore::new();
        let suco = produto(Uuid::new_v4(), "Suco", Decimal::new(800, 2));

        cart.add_item(suco.clone(), 2, None, vec![], None);
        cart.update_quantity(suco.id, 0, None);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_define_e_nao_incrementa() {
        let mut cart = CartStore::new();
        let suco = produto(Uuid::new_v4(), "Suco", Decimal::new(800, 2));

        cart.add_item(suco.clone(), 2, None, vec![], None);
        cart.update_quantity(suco.id, 5, None);

        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn preco_calculado_com_opcao_e_congelado_na_linha() {
        let mut cart = CartStore::new();
        let pizza = produto(Uuid::new_v4(), "Pizza", Decimal::new(4000, 2));
        let grande = opcao(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(500, 2));

        // Preço base + 5.00 do tamanho grande, calculado no modal de opções
        cart.add_item(
            pizza,
            1,
            None,
            vec![grande],
            Some(Decimal::new(4500, 2)),
        );

        assert_eq!(cart.items()[0].unit_price(), Decimal::new(4500, 2));
        assert_eq!(cart.get_total(), Decimal::new(4500, 2));
    }

    #[test]
    fn total_do_cenario_de_checkout() {
        // Burger 20.00 x2, taxa de entrega 5.00 => 45.00
        let mut cart = CartStore::new();
        let burger = produto(Uuid::new_v4(), "Burger", Decimal::new(2000, 2));

        cart.add_item(burger, 2, None, vec![], None);

        let delivery_fee = Decimal::new(500, 2);
        let total = cart.get_total() + delivery_fee;
        assert_eq!(total, Decimal::new(4500, 2));
        assert_eq!(checkout_total(total, PaymentMethod::Card), Decimal::new(4500, 2));
    }

    #[test]
    fn pix_paga_95_por_cento() {
        let total = Decimal::new(10000, 2);
        assert_eq!(checkout_total(total, PaymentMethod::Pix), Decimal::new(9500, 2));
        assert_eq!(checkout_total(total, PaymentMethod::Cash), total);
    }

    #[test]
    fn clear_cart_esvazia_tudo() {
        let mut cart = CartStore::new();
        let burger = produto(Uuid::new_v4(), "Burger", Decimal::new(2000, 2));
        cart.add_item(burger, 3, None, vec![], None);

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.get_total(), Decimal::ZERO);
        assert_eq!(cart.get_item_count(), 0);
    }
}
