// src/services/tenant_resolver.rs
//
// Resolve a qual restaurante (tenant) um pedido pertence, a partir dos donos
// dos produtos do carrinho. Função pura sobre as linhas já buscadas no banco:
// quem chama é responsável por carregar os produtos.

use thiserror::Error;
use uuid::{Uuid, uuid};

use crate::common::error::AppError;

// UUID do restaurante demo, dono de todos os produtos legados criados antes
// do multi-tenant. Garante que todo pedido resolve para ALGUM tenant.
pub const LEGACY_RESTAURANT_ID: Uuid = uuid!("f5f457d9-821e-4a21-9029-e181b1bee792");

#[derive(Debug, Clone)]
pub struct LineOwnership {
    pub product_id: Uuid,
    // Nulo = produto legado, sem dono
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TenantResolutionError {
    #[error("produtos de restaurantes diferentes no mesmo pedido")]
    MixedRestaurants,
    #[error("nenhum produto encontrado")]
    NoProducts,
}

impl From<TenantResolutionError> for AppError {
    fn from(err: TenantResolutionError) -> Self {
        match err {
            TenantResolutionError::MixedRestaurants => AppError::MixedRestaurants,
            TenantResolutionError::NoProducts => AppError::NoProductsFound,
        }
    }
}

/// Determina o único restaurante dono do pedido, ou rejeita.
///
/// Regras:
/// - havendo produtos com dono, todos precisam ter o MESMO dono, e não é
///   permitido misturar produtos com dono e produtos legados;
/// - sendo todos legados, vale o `hint` do cliente e, na falta dele, o
///   restaurante demo ([`LEGACY_RESTAURANT_ID`]).
pub fn resolve_tenant(
    items: &[LineOwnership],
    hint: Option<Uuid>,
) -> Result<Uuid, TenantResolutionError> {
    if items.is_empty() {
        return Err(TenantResolutionError::NoProducts);
    }

    let owned: Vec<&LineOwnership> =
        items.iter().filter(|item| item.restaurant_id.is_some()).collect();
    let unowned_count = items.len() - owned.len();

    let resolved = if let Some(first) = owned.first() {
        let owner = first.restaurant_id.ok_or(TenantResolutionError::MixedRestaurants)?;

        if owned.iter().any(|item| item.restaurant_id != Some(owner)) {
            return Err(TenantResolutionError::MixedRestaurants);
        }
        // Produtos legados não podem pegar carona num pedido de restaurante
        if unowned_count > 0 {
            return Err(TenantResolutionError::MixedRestaurants);
        }
        owner
    } else {
        hint.unwrap_or(LEGACY_RESTAURANT_ID)
    };

    // Revalidação final sobre o conjunto completo: nenhum item com dono pode
    // divergir do tenant resolvido.
    let all_match = items
        .iter()
        .filter_map(|item| item.restaurant_id)
        .all(|owner| owner == resolved);
    if !all_match {
        return Err(TenantResolutionError::MixedRestaurants);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(restaurant_id: Option<Uuid>) -> LineOwnership {
        LineOwnership {
            product_id: Uuid::new_v4(),
            restaurant_id,
        }
    }

    #[test]
    fn todos_do_mesmo_dono_resolve_para_ele() {
        let dono = Uuid::new_v4();
        let itens = vec![linha(Some(dono)), linha(Some(dono)), linha(Some(dono))];

        assert_eq!(resolve_tenant(&itens, None), Ok(dono));
    }

    #[test]
    fn donos_diferentes_rejeita_com_mixed() {
        let itens = vec![linha(Some(Uuid::new_v4())), linha(Some(Uuid::new_v4()))];

        assert_eq!(
            resolve_tenant(&itens, None),
            Err(TenantResolutionError::MixedRestaurants)
        );
    }

    #[test]
    fn misturar_legado_com_produto_de_restaurante_rejeita() {
        let dono = Uuid::new_v4();
        let itens = vec![linha(Some(dono)), linha(None)];

        assert_eq!(
            resolve_tenant(&itens, None),
            Err(TenantResolutionError::MixedRestaurants)
        );
    }

    #[test]
    fn todos_legados_sem_hint_cai_no_restaurante_demo() {
        let itens = vec![linha(None), linha(None)];

        assert_eq!(resolve_tenant(&itens, None), Ok(LEGACY_RESTAURANT_ID));
    }

    #[test]
    fn todos_legados_com_hint_usa_o_hint() {
        let hint = Uuid::new_v4();
        let itens = vec![linha(None)];

        assert_eq!(resolve_tenant(&itens, Some(hint)), Ok(hint));
    }

    #[test]
    fn hint_nao_sobrepoe_dono_real_dos_produtos() {
        let dono = Uuid::new_v4();
        let itens = vec![linha(Some(dono))];

        // O hint do cliente é ignorado quando os produtos têm dono
        assert_eq!(resolve_tenant(&itens, Some(Uuid::new_v4())), Ok(dono));
    }

    #[test]
    fn conjunto_vazio_rejeita_com_no_products() {
        assert_eq!(
            resolve_tenant(&[], None),
            Err(TenantResolutionError::NoProducts)
        );
    }
}
