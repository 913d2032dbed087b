//! `repl::npc` module
//!
//! Contains repl loop handlers for talking to and buying from characters.
//! Each location has at most one merchant: the first character placed there.

use anyhow::Result;
use log::{info, warn};

use crate::component::Kind;
use crate::entity::Entity;
use crate::helpers::capitalize;
use crate::{View, ViewItem, World};

/// Hear what a co-located character has to say and see what they sell.
///
/// # Errors
/// - if the player's location cannot be found
pub fn talk_to_handler(world: &World, view: &mut View, character_name: &str) -> Result<()> {
    let location = world.player_location()?;
    let Some(character) = world
        .find_by_name(character_name, Some(Kind::Character))
        .and_then(|entity| entity.character())
    else {
        view.push(ViewItem::ActionFailure(format!(
            "\"{}\" is not a valid Character name.",
            capitalize(character_name)
        )));
        return Ok(());
    };
    if character.location != Some(location.id()) {
        view.push(ViewItem::ActionFailure(format!(
            "You need to be in the same location as {} to talk to them!",
            character.name()
        )));
        return Ok(());
    }
    view.push(ViewItem::NpcSpeech {
        speaker: character.name().to_string(),
        quote: character.text.clone(),
    });
    view.push(ViewItem::MerchantStock(
        character.inventory.render(character.name(), Some(world.pricing())),
    ));
    info!("player talked to '{}'", character.internal_key());
    Ok(())
}

/// Buy one unit of an item from the merchant in the player's location.
///
/// # Errors
/// - if the player's location cannot be found
pub fn buy_handler(world: &mut World, view: &mut View, thing: &str) -> Result<()> {
    let (item, merchant_id) = {
        let location = world.player_location()?;
        let merchant = world.merchant_at(location.id());
        // the merchant's own stock first
        let Some(item) = merchant
            .and_then(|m| m.inventory.find_by_name(thing))
            .or_else(|| world.find_stock_item(thing))
        else {
            view.push(ViewItem::ActionFailure(format!(
                "\"{}\" is not a valid Item name!",
                capitalize(thing)
            )));
            return Ok(());
        };
        let Some(merchant) = merchant else {
            view.push(ViewItem::ActionFailure(
                "There is no merchant here to buy this from!".to_string(),
            ));
            return Ok(());
        };
        if !merchant.inventory.contains(item.id()) {
            view.push(ViewItem::ActionFailure(format!(
                "{} does not have \"{}\" for sale!",
                merchant.name(),
                item.name()
            )));
            return Ok(());
        }
        (item.clone(), merchant.id())
    };

    let currency = world.currency.clone();
    let (player, merchant) = world.player_and_character_mut(merchant_id)?;
    match player.purchase(&mut merchant.inventory, &item) {
        Ok(true) => {
            view.push(ViewItem::ActionSuccess(format!(
                "{} added to inventory for {} {currency}s.",
                item.name(),
                item.price
            )));
            info!("player bought '{}' from '{}'", item.internal_key(), merchant.internal_key());
        },
        Ok(false) => {
            view.push(ViewItem::ActionFailure(format!(
                "You don't have enough money to buy \"{}\" for {} {currency}s!",
                item.name(),
                item.price
            )));
        },
        Err(err) => {
            warn!("purchase of '{}' rejected: {err}", item.internal_key());
            view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(())
}
