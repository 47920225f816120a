use access_core::{
    error::{AccessError, ErrorKind},
    events::{RegistryEvent, minted_token_ids},
    registry::{AccessRegistry, bindings::RoleBinding, transfer_policy::BurnPolicy},
    types::{
        function_id::{FunctionId, selector_from_signature},
        registry_settings::RegistrySettings,
        token::TokenId,
    },
};
use alloy::primitives::{Address, U256, aliases::B32};
use alloy::sol_types::SolError;

const ADMIN: Address = Address::repeat_byte(0xaa);
const USER1: Address = Address::repeat_byte(0x01);
const USER2: Address = Address::repeat_byte(0x02);
const USER3: Address = Address::repeat_byte(0x03);

/// Protected contract that gates its entry points through the registry.
struct MockProtocol {
    address: Address,
}

impl MockProtocol {
    fn new() -> Self {
        Self {
            address: Address::repeat_byte(0x42),
        }
    }

    fn func1() -> B32 {
        selector_from_signature("func1()")
    }

    fn func2() -> B32 {
        selector_from_signature("func2()")
    }

    fn call(&self, registry: &AccessRegistry, caller: Address, selector: B32) -> Result<(), AccessError> {
        registry.require_access(caller, self.address, selector)
    }

    fn binding(&self, selector: B32, role_id: u8) -> RoleBinding {
        RoleBinding::new(self.address, selector, role_id)
    }
}

fn registry() -> AccessRegistry {
    AccessRegistry::new(&RegistrySettings::new(ADMIN)).unwrap()
}

fn is_access_not_granted(result: Result<(), AccessError>) -> bool {
    matches!(result, Err(e) if e.kind() == ErrorKind::AccessDenied && e.error_code() == "AccessNotGranted")
}

/// Role, binding to func1 and a grant to USER1. Returns the token id.
fn setup_func1(reg: &mut AccessRegistry, protocol: &MockProtocol) -> TokenId {
    let role = reg.add_role(ADMIN, "Role0").unwrap();
    reg.bind_role(ADMIN, protocol.binding(MockProtocol::func1(), role))
        .unwrap();
    reg.grant_role(ADMIN, USER1, role).unwrap()
}

#[test]
fn role_capacity_is_256() {
    let mut reg = registry();
    for i in 0..256u32 {
        let id = reg.add_role(ADMIN, &format!("Role{}", i)).unwrap();
        assert_eq!(u32::from(id), i);
    }
    assert_eq!(reg.role_count(), 256);
    assert_eq!(
        reg.add_role(ADMIN, "Role256"),
        Err(AccessError::MaxRolesReached)
    );
    assert_eq!(reg.get_role(255).unwrap().as_str(), "Role255");
}

#[test]
fn role_names_up_to_32_bytes() {
    let mut reg = registry();
    let name32 = "a".repeat(32);
    let name33 = "a".repeat(33);

    assert_eq!(
        reg.add_role(ADMIN, &name33),
        Err(AccessError::TooBigRoleName(33))
    );
    let id = reg.add_role(ADMIN, &name32).unwrap();
    assert_eq!(
        reg.rename_role(ADMIN, id, &name33),
        Err(AccessError::TooBigRoleName(33))
    );
    reg.rename_role(ADMIN, id, "short").unwrap();
    assert_eq!(reg.get_role(id).unwrap().as_str(), "short");
}

#[test]
fn bound_and_granted_role_passes() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    setup_func1(&mut reg, &protocol);

    assert!(reg.has_access(USER1, protocol.address, MockProtocol::func1()));
    assert!(protocol.call(&reg, USER1, MockProtocol::func1()).is_ok());

    assert!(!reg.has_access(USER2, protocol.address, MockProtocol::func1()));
    assert!(is_access_not_granted(
        protocol.call(&reg, USER2, MockProtocol::func1())
    ));
    // Bound nowhere else.
    assert!(is_access_not_granted(
        protocol.call(&reg, USER1, MockProtocol::func2())
    ));

    let err = protocol
        .call(&reg, USER2, MockProtocol::func1())
        .unwrap_err();
    assert_eq!(
        err.revert_data()[..4],
        access_core::bindings::access::Access::AccessNotGranted::SELECTOR
    );
}

#[test]
fn unbind_twice_is_one_transition() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    setup_func1(&mut reg, &protocol);
    reg.take_events();

    let binding = protocol.binding(MockProtocol::func1(), 0);
    assert_eq!(reg.unbind_role(ADMIN, binding), Ok(true));
    assert_eq!(reg.unbind_role(ADMIN, binding), Ok(false));
    assert_eq!(
        reg.take_events(),
        vec![RegistryEvent::RoleUnbound {
            func_id: FunctionId::new(protocol.address, MockProtocol::func1()),
            role_id: 0
        }]
    );
    assert!(is_access_not_granted(
        protocol.call(&reg, USER1, MockProtocol::func1())
    ));
}

#[test]
fn bind_roles_deduplicates_within_batch() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let role = reg.add_role(ADMIN, "Role0").unwrap();
    reg.take_events();

    let binding = protocol.binding(MockProtocol::func1(), role);
    assert_eq!(reg.bind_roles(ADMIN, &[binding, binding, binding]), Ok(1));
    let events = reg.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "RoleBound");

    // Binding again later is a silent no-op.
    assert_eq!(reg.bind_role(ADMIN, binding), Ok(false));
    assert!(reg.events().is_empty());
}

#[test]
fn duplicate_grant_rejected() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    setup_func1(&mut reg, &protocol);

    let err = reg.grant_role(ADMIN, USER1, 0).unwrap_err();
    assert_eq!(
        err,
        AccessError::RoleAlreadyGranted {
            user: USER1,
            role_id: 0
        }
    );
    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert_eq!(reg.ledger().balance_of(USER1), 1);
}

#[test]
fn transfer_moves_access() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let token_id = setup_func1(&mut reg, &protocol);
    assert!(protocol.call(&reg, USER1, MockProtocol::func1()).is_ok());
    reg.take_events();

    reg.transfer_from(USER1, USER1, USER2, token_id).unwrap();

    assert!(is_access_not_granted(
        protocol.call(&reg, USER1, MockProtocol::func1())
    ));
    assert!(protocol.call(&reg, USER2, MockProtocol::func1()).is_ok());
    assert_eq!(
        reg.events(),
        &[RegistryEvent::Transfer {
            from: USER1,
            to: USER2,
            token_id
        }]
    );
    assert_eq!(reg.ledger().tokens_of(USER2), &[token_id]);
    assert!(reg.ledger().tokens_of(USER1).is_empty());
}

#[test]
fn transfer_into_holder_of_same_role_rejected() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let token_id = setup_func1(&mut reg, &protocol);
    reg.grant_role(ADMIN, USER2, 0).unwrap();

    assert_eq!(
        reg.transfer_from(USER1, USER1, USER2, token_id),
        Err(AccessError::RoleAlreadyGranted {
            user: USER2,
            role_id: 0
        })
    );
    // Stranger cannot move someone else's token.
    assert_eq!(
        reg.transfer_from(USER3, USER1, USER3, token_id),
        Err(AccessError::NotTokenOwner {
            caller: USER3,
            token_id
        })
    );
}

#[test]
fn approved_operator_can_transfer() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let token_id = setup_func1(&mut reg, &protocol);

    reg.approve(USER1, USER3, token_id).unwrap();
    assert_eq!(reg.ledger().get_approved(token_id), Some(USER3));
    reg.transfer_from(USER3, USER1, USER2, token_id).unwrap();
    assert_eq!(reg.ledger().get_approved(token_id), None);

    reg.set_approval_for_all(USER2, USER3, true).unwrap();
    reg.transfer_from(USER3, USER2, USER1, token_id).unwrap();
    assert!(protocol.call(&reg, USER1, MockProtocol::func1()).is_ok());
}

#[test]
fn non_transferable_until_admin_unlocks() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let role = reg.add_role(ADMIN, "Role0").unwrap();
    reg.bind_role(ADMIN, protocol.binding(MockProtocol::func1(), role))
        .unwrap();
    let token_id = reg.grant_role_non_transferable(ADMIN, USER1, role).unwrap();

    let err = reg.transfer_from(USER1, USER1, USER2, token_id).unwrap_err();
    assert_eq!(err, AccessError::TokenNonTransferable(token_id));
    assert_eq!(err.kind(), ErrorKind::Policy);

    // Asking for the current state again changes nothing.
    assert_eq!(
        reg.change_token_transferability(ADMIN, token_id, true),
        Err(AccessError::NoChanges(token_id))
    );
    reg.change_token_transferability(ADMIN, token_id, false)
        .unwrap();
    reg.transfer_from(USER1, USER1, USER2, token_id).unwrap();
    assert!(protocol.call(&reg, USER2, MockProtocol::func1()).is_ok());
}

#[test]
fn burn_of_one_role_keeps_the_other() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let role1 = reg.add_role(ADMIN, "Role1").unwrap();
    let role2 = reg.add_role(ADMIN, "Role2").unwrap();
    reg.bind_roles(
        ADMIN,
        &[
            protocol.binding(MockProtocol::func1(), role1),
            protocol.binding(MockProtocol::func2(), role2),
        ],
    )
    .unwrap();
    let token1 = reg.grant_role(ADMIN, USER1, role1).unwrap();
    reg.grant_role(ADMIN, USER1, role2).unwrap();

    assert!(protocol.call(&reg, USER1, MockProtocol::func1()).is_ok());
    assert!(protocol.call(&reg, USER1, MockProtocol::func2()).is_ok());

    reg.burn(ADMIN, token1).unwrap();
    assert!(is_access_not_granted(
        protocol.call(&reg, USER1, MockProtocol::func1())
    ));
    assert!(protocol.call(&reg, USER1, MockProtocol::func2()).is_ok());
    assert!(reg.events().last().unwrap().is_burn());
}

#[test]
fn rename_preserves_access() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let token_id = setup_func1(&mut reg, &protocol);

    reg.rename_role(ADMIN, 0, "Renamed").unwrap();
    assert_eq!(reg.get_role(0).unwrap().as_str(), "Renamed");
    assert!(protocol.call(&reg, USER1, MockProtocol::func1()).is_ok());
    assert_eq!(reg.ledger().token(token_id).unwrap().role_id, 0);
    assert!(
        reg.get_bound_mask(FunctionId::new(protocol.address, MockProtocol::func1()))
            .contains(0)
    );
}

#[test]
fn admin_bulk_revoke() {
    let mut reg = registry();
    for i in 0..3 {
        let role = reg.add_role(ADMIN, &format!("Role{}", i)).unwrap();
        reg.grant_role(ADMIN, USER1, role).unwrap();
    }
    reg.grant_role(ADMIN, USER2, 0).unwrap();
    let minted = minted_token_ids(reg.events());
    assert_eq!(minted.len(), 4);

    let revoked = reg.revoke_all(ADMIN, USER1).unwrap();
    assert_eq!(revoked, minted[..3].to_vec());
    assert!(reg.role_mask_of(USER1).is_empty());
    assert_eq!(reg.ledger().total_supply(), 1);
    assert_eq!(reg.ledger().token_by_index(0), Some(minted[3]));

    // Ids are never reused.
    let next = reg.grant_role(ADMIN, USER1, 0).unwrap();
    assert_eq!(next, U256::from(4u8));
}

#[test]
fn holders_burn_under_token_owner_policy() {
    let protocol = MockProtocol::new();
    let mut settings = RegistrySettings::new(ADMIN);
    settings.burn_policy = BurnPolicy::TokenOwner;
    let mut reg = AccessRegistry::new(&settings).unwrap();
    let token_id = setup_func1(&mut reg, &protocol);

    assert_eq!(
        reg.burn(USER2, token_id),
        Err(AccessError::NotTokenOwner {
            caller: USER2,
            token_id
        })
    );
    reg.burn(USER1, token_id).unwrap();
    assert!(is_access_not_granted(
        protocol.call(&reg, USER1, MockProtocol::func1())
    ));
}

#[test]
fn whitelist_gates_transfers_only() {
    let protocol = MockProtocol::new();
    let mut settings = RegistrySettings::new(ADMIN);
    settings.whitelist_enabled = true;
    let mut reg = AccessRegistry::new(&settings).unwrap();
    // Grants never consult the whitelist.
    let token_id = setup_func1(&mut reg, &protocol);

    assert_eq!(
        reg.transfer_from(USER1, USER1, USER2, token_id),
        Err(AccessError::NotInWhitelist(USER1))
    );
    reg.add_whitelist(ADMIN, &[USER1]).unwrap();
    assert_eq!(
        reg.transfer_from(USER1, USER1, USER2, token_id),
        Err(AccessError::NotInWhitelist(USER2))
    );
    reg.add_whitelist(ADMIN, &[USER2]).unwrap();
    reg.transfer_from(USER1, USER1, USER2, token_id).unwrap();

    reg.remove_whitelist(ADMIN, &[USER1]).unwrap();
    assert!(!reg.is_whitelisted(USER1));
    assert_eq!(
        reg.transfer_from(USER2, USER2, USER1, token_id),
        Err(AccessError::NotInWhitelist(USER1))
    );
}

#[test]
fn non_admin_cannot_administer() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    setup_func1(&mut reg, &protocol);
    let before = reg.events().len();

    let err = reg.add_role(USER1, "Sneaky").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(err.error_code(), "OwnableUnauthorizedAccount");
    assert!(
        reg.bind_role(USER1, protocol.binding(MockProtocol::func2(), 0))
            .is_err()
    );
    assert!(reg.grant_role(USER1, USER2, 0).is_err());
    assert!(reg.burn(USER1, U256::ZERO).is_err());
    assert_eq!(reg.events().len(), before);
    assert_eq!(reg.role_count(), 1);
}

#[test]
fn admin_burns_every_grant_holder_cannot() {
    let mut reg = registry();
    let mut granted = Vec::new();
    for i in 0..3 {
        let role = reg.add_role(ADMIN, &format!("Role{}", i)).unwrap();
        granted.push(reg.grant_role(ADMIN, USER1, role).unwrap());
    }

    for token_id in &granted {
        let err = reg.burn(USER1, *token_id).unwrap_err();
        assert_eq!(
            err,
            AccessError::NotTokenOwner {
                caller: USER1,
                token_id: *token_id
            }
        );
        assert_eq!(err.error_code(), "NotTokenOwner");
    }
    // Rejected before the id is looked up.
    assert_eq!(
        reg.burn(USER2, U256::from(77u8)),
        Err(AccessError::NotTokenOwner {
            caller: USER2,
            token_id: U256::from(77u8)
        })
    );

    for token_id in &granted {
        reg.burn(ADMIN, *token_id).unwrap();
    }
    assert!(reg.role_mask_of(USER1).is_empty());
    assert_eq!(reg.ledger().balance_of(USER1), 0);
}

#[test]
fn ledger_edge_cases_rejected() {
    let protocol = MockProtocol::new();
    let mut reg = registry();
    let token_id = setup_func1(&mut reg, &protocol);
    let before = reg.events().len();

    assert_eq!(
        reg.transfer_from(USER1, USER1, Address::ZERO, token_id),
        Err(AccessError::InvalidReceiver(Address::ZERO))
    );
    assert_eq!(
        reg.approve(USER3, USER2, token_id),
        Err(AccessError::NotTokenOwner {
            caller: USER3,
            token_id
        })
    );
    let missing = U256::from(99u8);
    assert_eq!(
        reg.change_token_transferability(ADMIN, missing, true),
        Err(AccessError::NonexistentToken(missing))
    );
    assert_eq!(
        reg.set_approval_for_all(USER1, Address::ZERO, true),
        Err(AccessError::InvalidOperator(Address::ZERO))
    );

    assert_eq!(reg.events().len(), before);
    assert_eq!(reg.ledger().owner_of(token_id), Some(USER1));
    assert_eq!(reg.ledger().get_approved(token_id), None);
}
